//! Theme system for TUI colors and styles
//!
//! Defines color constants consistent with the one-shot `show` output.

use iocraft::prelude::Color;

use crate::page::rating::Rgb;
use crate::page::toast::ToastLevel;

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Product colors
    pub price: Color,
    pub star: Color,
    pub link: Color,

    // Toast colors
    pub info: Color,
    pub warning: Color,
    pub error: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let gray = Color::Rgb {
            r: 120,
            g: 120,
            b: 120,
        };
        Self {
            price: Color::Green,
            star: Color::Yellow,
            link: Color::Cyan,

            info: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,

            border: gray,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: gray,
            highlight: Color::Blue,
        }
    }
}

impl Theme {
    /// Get the color for a toast level
    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Info => self.info,
            ToastLevel::Warning => self.warning,
            ToastLevel::Error => self.error,
        }
    }

    /// Convert a configured palette color
    pub fn rgb(color: Rgb) -> Color {
        Color::Rgb {
            r: color.0,
            g: color.1,
            b: color.2,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
