//! Pager view model for the review and question lists.

use crate::types::Paginated;

/// What the footer of a list panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub page: u32,
    pub total_pages: u32,
    pub total_docs: u64,
    pub has_prev: bool,
    pub has_next: bool,
    /// 1-based index of the first item on this page
    pub first_item: u64,
    /// 1-based index of the last item on this page
    pub last_item: u64,
}

impl PagerView {
    /// Build the pager for a page of results.
    ///
    /// Returns `None` when there is nothing to page through
    /// (`total_docs == 0`), in which case neither the indicator nor the
    /// pager control is shown.
    pub fn from_page<T>(page: &Paginated<T>) -> Option<Self> {
        if page.total_docs == 0 {
            return None;
        }
        let first_item = page.paging_counter.max(1);
        let last_item = (first_item + page.docs.len() as u64)
            .saturating_sub(1)
            .max(first_item)
            .min(page.total_docs);
        Some(Self {
            page: page.page,
            total_pages: page.total_pages,
            total_docs: page.total_docs,
            has_prev: page.has_prev_page,
            has_next: page.has_next_page,
            first_item,
            last_item,
        })
    }

    /// "Page 2 of 5"
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }

    /// Compact pager control, e.g. `‹ 1 [2] 3 4 5 ›`.
    ///
    /// Shows at most `window` page numbers centred on the current page.
    pub fn control(&self, window: u32) -> String {
        let window = window.max(1);
        let half = window / 2;
        let mut start = self.page.saturating_sub(half).max(1);
        let end = start.saturating_add(window - 1).min(self.total_pages).max(start);
        if end - start < window - 1 {
            start = end.saturating_sub(window - 1).max(1);
        }

        let mut parts = Vec::new();
        parts.push(if self.has_prev { "‹" } else { " " }.to_string());
        if start > 1 {
            parts.push("…".to_string());
        }
        for n in start..=end {
            if n == self.page {
                parts.push(format!("[{n}]"));
            } else {
                parts.push(n.to_string());
            }
        }
        if end < self.total_pages {
            parts.push("…".to_string());
        }
        parts.push(if self.has_next { "›" } else { " " }.to_string());
        parts.join(" ")
    }

    /// "Showing 11-20 of 42"
    pub fn range_label(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.first_item, self.last_item, self.total_docs
        )
    }
}
