//! Product details components
//!
//! `DetailsPane` is the always-visible product header (name, price, rating
//! aggregate); `DescriptionPanel` is the body of the Details tab.

use iocraft::prelude::*;

use crate::tui::theme::theme;
use crate::types::Product;

/// Props for the DetailsPane component
#[derive(Default, Props)]
pub struct DetailsPaneProps {
    pub product: Option<Product>,
    /// "4.5 ★ (12 reviews)"
    pub badge: String,
}

#[component]
pub fn DetailsPane(props: &DetailsPaneProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(product) = props.product.clone() else {
        return element! { View() };
    };

    element! {
        View(
            width: 100pct,
            flex_direction: FlexDirection::Column,
            padding_left: 1,
            padding_right: 1,
            border_edges: Edges::Bottom,
            border_style: BorderStyle::Single,
            border_color: theme.border,
        ) {
            Text(content: product.name.clone(), color: theme.text, weight: Weight::Bold)
            View(flex_direction: FlexDirection::Row, column_gap: 2) {
                #(product.price.map(|price| element! {
                    Text(content: format!("${price:.2}"), color: theme.price, weight: Weight::Bold)
                }))
                Text(content: props.badge.clone(), color: theme.star)
            }
        }
    }
}

/// Props for the DescriptionPanel component
#[derive(Default, Props)]
pub struct DescriptionPanelProps {
    pub description: Option<String>,
    /// Lines to skip from the top
    pub scroll: usize,
}

#[component]
pub fn DescriptionPanel(props: &DescriptionPanelProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let text = visible_description(props.description.as_deref(), props.scroll);

    element! {
        View(flex_grow: 1.0, padding_left: 1, padding_right: 1, overflow: Overflow::Hidden) {
            Text(content: text, color: theme.text)
        }
    }
}

/// Description with the first `scroll` lines dropped, or a placeholder
fn visible_description(description: Option<&str>, scroll: usize) -> String {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return "No description provided.".to_string();
    };
    let lines: Vec<&str> = description.lines().collect();
    let skip = scroll.min(lines.len().saturating_sub(1));
    lines[skip..].join("\n")
}
