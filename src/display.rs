//! Plain-terminal rendering of a settled product page, for `storefront show`.

use owo_colors::OwoColorize;
use serde_json::{Value, json};

use crate::page::model::{ListBody, ListView, PageView, ReadyView};
use crate::page::rating::bar;
use crate::page::sidebar::LogoView;
use crate::types::{Question, Review};

const BAR_WIDTH: usize = 20;

/// Human-readable page text
pub fn format_page_text(view: &PageView) -> String {
    match view {
        PageView::Loading => "Loading...".dimmed().to_string(),
        PageView::NotFound => "Product not found".yellow().to_string(),
        PageView::Failed(message) => {
            format!("{} {message}", "Failed to load product:".red())
        }
        PageView::Ready(ready) => format_ready(ready),
    }
}

fn format_ready(ready: &ReadyView) -> String {
    let product = &ready.product;
    let mut out = String::new();

    out.push_str(&product.name.bold().to_string());
    if let Some(price) = product.price {
        out.push_str(&format!("  {}", format!("${price:.2}").green().bold()));
    }
    out.push('\n');
    out.push_str(&format!("{}\n\n", ready.badge.yellow()));

    match product.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => {
            out.push_str(description);
            out.push('\n');
        }
        _ => out.push_str(&format!("{}\n", "No description provided.".dimmed())),
    }

    // Shop
    let shop = &ready.sidebar;
    out.push_str(&format!("\n{} {}\n", "Shop:".cyan(), shop.name));
    if let LogoView::Image(url) = &shop.logo {
        out.push_str(&format!("  logo: {url}\n"));
    }
    if let Some(description) = &shop.description {
        out.push_str(&format!("  {description}\n"));
    }
    if let Some(contact) = &shop.contact {
        out.push_str(&format!("  contact: {contact}\n"));
    }
    if let Some(website) = &shop.website {
        out.push_str(&format!("  website: {website}\n"));
    }
    if let Some(share) = &shop.share {
        out.push_str(&format!("{} {}\n", "Share:".cyan(), share.product_url));
    }

    // Reviews
    out.push_str(&format!("\n{}", "Reviews".cyan().bold()));
    out.push_str(&pager_suffix(&ready.reviews));
    out.push('\n');
    for bucket in &ready.histogram {
        out.push_str(&format!(
            "  {} ★ {} {:>3.0}% ({})\n",
            bucket.rating,
            bar(bucket.fraction, BAR_WIDTH),
            bucket.percent(),
            bucket.count
        ));
    }
    out.push_str(&format_list(&ready.reviews, review_lines));

    // Questions
    out.push_str(&format!("\n{}", "Questions".cyan().bold()));
    out.push_str(&pager_suffix(&ready.questions));
    out.push('\n');
    out.push_str(&format_list(&ready.questions, question_lines));

    out.trim_end().to_string()
}

fn pager_suffix<T>(view: &ListView<T>) -> String {
    view.pager
        .as_ref()
        .map(|p| format!("  {}", format!("{} ({})", p.indicator(), p.range_label()).dimmed()))
        .unwrap_or_default()
}

fn format_list<T>(view: &ListView<T>, lines: fn(&T) -> String) -> String {
    match &view.body {
        ListBody::Loading => format!("  {}\n", "Loading...".dimmed()),
        ListBody::Empty(message) => format!("  {}\n", message.dimmed()),
        ListBody::Failed(message) => format!("  {} {message}\n", "Failed to load:".red()),
        ListBody::Items(items) => items.iter().map(lines).collect(),
    }
}

fn review_lines(review: &Review) -> String {
    let stars = "★".repeat(review.rating.clamp(0.0, 5.0).round() as usize);
    let date = review
        .created_at
        .map(|ts| ts.strftime("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let mut out = format!(
        "  {} {} {}\n",
        stars.yellow(),
        review.author_name().bold(),
        date.dimmed()
    );
    if let Some(title) = review.title.as_deref().filter(|t| !t.trim().is_empty()) {
        out.push_str(&format!("    {}\n", title.bold()));
    }
    out.push_str(&format!("    {}\n", review.comment));
    out
}

fn question_lines(question: &Question) -> String {
    let answer = question
        .answer
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or("Not answered yet");
    format!(
        "  {} {} {}\n    {} {}\n",
        "Q:".cyan(),
        question.question,
        format!("({})", question.author_name()).dimmed(),
        "A:".green(),
        answer
    )
}

fn list_json<T: serde::Serialize>(view: &ListView<T>) -> Value {
    let (status, items, error) = match &view.body {
        ListBody::Loading => ("loading", Vec::new(), None),
        ListBody::Empty(_) => ("empty", Vec::new(), None),
        ListBody::Failed(message) => ("failed", Vec::new(), Some(message.clone())),
        ListBody::Items(items) => (
            "ready",
            items
                .iter()
                .filter_map(|item| serde_json::to_value(item).ok())
                .collect(),
            None,
        ),
    };
    json!({
        "status": status,
        "items": items,
        "error": error,
        "page": view.pager.as_ref().map(|p| p.page),
        "total_pages": view.pager.as_ref().map(|p| p.total_pages),
        "total_docs": view.pager.as_ref().map(|p| p.total_docs).unwrap_or(0),
    })
}

/// Machine-readable page, for `--json`
pub fn page_json(view: &PageView) -> Value {
    match view {
        PageView::Loading => json!({ "status": "loading" }),
        PageView::NotFound => json!({ "status": "not_found" }),
        PageView::Failed(message) => json!({ "status": "failed", "error": message }),
        PageView::Ready(ready) => json!({
            "status": "ready",
            "product": ready.product.as_ref(),
            "badge": ready.badge,
            "histogram": ready.histogram.iter().map(|b| json!({
                "rating": b.rating,
                "count": b.count,
                "percent": b.percent(),
            })).collect::<Vec<_>>(),
            "shop": {
                "name": ready.sidebar.name,
                "description": ready.sidebar.description,
                "contact": ready.sidebar.contact,
                "website": ready.sidebar.website,
            },
            "share_url": ready.sidebar.share.as_ref().map(|s| s.product_url.clone()),
            "reviews": list_json(&ready.reviews),
            "questions": list_json(&ready.questions),
        }),
    }
}
