//! TUI module for the interactive product page
//!
//! `product_page` owns the page state and wires key presses and API effects
//! to the reducer in `crate::page`; the other modules are its building blocks.

pub mod components;
pub mod composer_modal;
pub mod details_pane;
pub mod keymap;
pub mod product_page;
pub mod shop_sidebar;
pub mod tabs;
pub mod theme;

pub use keymap::{ComposerInput, KeyAction, key_to_action};
pub use product_page::{ProductPage, ProductPageProps};
pub use theme::Theme;
