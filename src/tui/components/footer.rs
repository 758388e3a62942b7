//! Keyboard shortcuts bar component
//!
//! Displays available keyboard shortcuts at the bottom of the screen.

use iocraft::prelude::*;

use crate::page::model::ProductTab;
use crate::page::store::ComposerKind;
use crate::tui::theme::theme;

/// A single keyboard shortcut entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// The key or key combination (e.g., "q", "Tab", "n/p")
    pub key: String,
    /// Description of the action (e.g., "quit", "next tab")
    pub action: String,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Props for the Footer component
#[derive(Default, Props)]
pub struct FooterProps {
    /// List of keyboard shortcuts to display
    pub shortcuts: Vec<Shortcut>,
}

/// Keyboard shortcuts bar at the bottom of the screen
#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            min_height: 1,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 2,
            background_color: theme.border,
        ) {
            #(props.shortcuts.iter().map(|shortcut| {
                let key = shortcut.key.clone();
                let action = shortcut.action.clone();
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(
                            content: format!("[{}]", key),
                            color: theme.highlight,
                            weight: Weight::Bold,
                        )
                        Text(
                            content: format!(" {}", action),
                            color: theme.text,
                        )
                    }
                }
            }))
        }
    }
}

/// Shortcuts for the product page, depending on the active tab
pub fn page_shortcuts(tab: ProductTab, compose_enabled: bool) -> Vec<Shortcut> {
    let mut shortcuts = vec![
        Shortcut::new("q", "quit"),
        Shortcut::new("Tab", "next tab"),
        Shortcut::new("1-3", "select tab"),
        Shortcut::new("j/k", "scroll"),
    ];
    if tab != ProductTab::Details {
        shortcuts.push(Shortcut::new("n/p", "page"));
        if compose_enabled {
            let label = match tab {
                ProductTab::Reviews => ComposerKind::Review.title(),
                _ => ComposerKind::Question.title(),
            };
            shortcuts.push(Shortcut::new("w", label.to_lowercase()));
        }
    }
    shortcuts.push(Shortcut::new("c", "copy link"));
    shortcuts.push(Shortcut::new("r", "retry"));
    shortcuts
}

/// Shortcuts while the composer overlay is open
pub fn composer_shortcuts(kind: ComposerKind) -> Vec<Shortcut> {
    let mut shortcuts = vec![Shortcut::new("Enter", "submit"), Shortcut::new("Esc", "cancel")];
    if kind == ComposerKind::Review {
        shortcuts.push(Shortcut::new("Tab", "rating/text"));
        shortcuts.push(Shortcut::new("1-5", "stars"));
    }
    shortcuts
}
