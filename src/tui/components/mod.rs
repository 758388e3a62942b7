//! Shared TUI components
//!
//! Building blocks used by the product page: the tab bar, the footer with
//! keyboard shortcuts, whole-page placeholders and toasts.

pub mod empty_state;
pub mod footer;
pub mod tab_bar;
pub mod toast;

pub use empty_state::{EmptyState, EmptyStateKind, EmptyStateProps};
pub use footer::{Footer, FooterProps, Shortcut, composer_shortcuts, page_shortcuts};
pub use tab_bar::{TabBar, TabBarProps};
pub use toast::render_toast;
