//! Empty state component
//!
//! Whole-page placeholder shown while the product is loading, when it does
//! not exist, or when it could not be fetched.

use iocraft::prelude::*;

use crate::page::model::{LOADING_MESSAGE, NOT_FOUND_MESSAGE};
use crate::tui::theme::theme;

/// Type of empty state to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyStateKind {
    #[default]
    Loading,
    NotFound,
    Failed,
}

/// Props for the EmptyState component
#[derive(Default, Props)]
pub struct EmptyStateProps {
    /// The kind of empty state to display
    pub kind: EmptyStateKind,
    /// Error text (for Failed)
    pub message: Option<String>,
}

/// Empty state display with a hint
#[component]
pub fn EmptyState(props: &EmptyStateProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let (icon, title, hint) = match props.kind {
        EmptyStateKind::Loading => ("~", LOADING_MESSAGE.to_string(), ""),
        EmptyStateKind::NotFound => ("?", NOT_FOUND_MESSAGE.to_string(), "Press 'q' to quit."),
        EmptyStateKind::Failed => (
            "!",
            format!(
                "Failed to load product: {}",
                props.message.clone().unwrap_or_default()
            ),
            "Press 'r' to retry or 'q' to quit.",
        ),
    };
    let accent = if props.kind == EmptyStateKind::Failed {
        theme.error
    } else {
        theme.border
    };

    element! {
        View(
            width: 100pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            padding: 2,
        ) {
            // Icon in a box
            View(
                width: 5,
                height: 3,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border_style: BorderStyle::Round,
                border_color: accent,
                margin_bottom: 1,
            ) {
                Text(content: icon, color: accent, weight: Weight::Bold)
            }

            View(max_width: 70) {
                Text(content: title, color: theme.text, weight: Weight::Bold)
            }

            #(if !hint.is_empty() {
                Some(element! {
                    View(margin_top: 2) {
                        Text(content: hint, color: theme.text_dimmed)
                    }
                })
            } else {
                None
            })
        }
    }
}
