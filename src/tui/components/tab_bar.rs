//! Product tab bar component
//!
//! Displays the [Details] [Reviews] [Q&A] selector.

use iocraft::prelude::*;

use crate::page::model::ProductTab;
use crate::tui::theme::theme;

/// Props for the TabBar component
#[derive(Default, Props)]
pub struct TabBarProps {
    pub active_tab: ProductTab,
    /// Review count shown next to the Reviews label
    pub review_count: Option<u64>,
}

/// Tab bar with the active tab highlighted
#[component]
pub fn TabBar(props: &TabBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let active = props.active_tab;

    element! {
        View(
            width: 100pct,
            padding_left: 1,
            border_edges: Edges::Bottom,
            border_style: BorderStyle::Single,
            border_color: theme.border,
        ) {
            #(ProductTab::ALL.iter().map(|&tab| {
                let label = match (tab, props.review_count) {
                    (ProductTab::Reviews, Some(count)) => format!("[{} ({})] ", tab.label(), count),
                    _ => format!("[{}] ", tab.label()),
                };
                element! {
                    Text(
                        content: label,
                        color: if tab == active { Color::Cyan } else { theme.text_dimmed },
                        weight: if tab == active { Weight::Bold } else { Weight::Normal },
                    )
                }
            }))
        }
    }
}
