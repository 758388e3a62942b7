//! Star-rating histogram and its color table.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StorefrontError};
use crate::types::RatingCount;

/// Buckets in display order, highest rating first
pub const RATING_BUCKETS: [u8; 5] = [5, 4, 3, 2, 1];

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || StorefrontError::Config(format!("invalid color '{s}', expected #rrggbb"));
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Color per star rating for the histogram bars
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingPalette {
    // index 0 holds the color for one star
    colors: [Rgb; 5],
}

impl Default for RatingPalette {
    fn default() -> Self {
        Self {
            colors: [
                Rgb(0xf4, 0x3f, 0x5e), // 1: rose
                Rgb(0xf5, 0x9e, 0x0b), // 2: amber
                Rgb(0x2d, 0xd4, 0xbf), // 3: teal, lighter
                Rgb(0x14, 0xb8, 0xa6), // 4: teal
                Rgb(0x22, 0xc5, 0x5e), // 5: green
            ],
        }
    }
}

impl RatingPalette {
    /// Color for a rating; ratings outside 1..=5 are clamped
    pub fn color_for(&self, rating: u8) -> Rgb {
        let idx = usize::from(rating.clamp(1, 5)) - 1;
        self.colors[idx]
    }

    pub fn set(&mut self, rating: u8, color: Rgb) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(StorefrontError::Config(format!(
                "invalid rating '{rating}' in rating_colors, expected 1-5"
            )));
        }
        self.colors[usize::from(rating) - 1] = color;
        Ok(())
    }
}

/// One bar of the histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBucket {
    pub rating: u8,
    pub count: u64,
    /// Share of all reviews in `0.0..=1.0`
    pub fraction: f64,
    pub color: Rgb,
}

impl RatingBucket {
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Build the five histogram buckets.
///
/// Each bucket takes the first entry whose rating equals the bucket value
/// numerically; ratings with no entry count zero. `total` is the product's
/// review total; when it is zero every fraction is zero.
pub fn rating_histogram(
    counts: &[RatingCount],
    total: u64,
    palette: &RatingPalette,
) -> Vec<RatingBucket> {
    RATING_BUCKETS
        .iter()
        .map(|&rating| {
            let count = counts
                .iter()
                .find(|c| c.rating == f64::from(rating))
                .map(|c| c.total)
                .unwrap_or(0);
            let fraction = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            };
            RatingBucket {
                rating,
                count,
                fraction,
                color: palette.color_for(rating),
            }
        })
        .collect()
}

/// Render a fixed-width bar, e.g. `████░░░░░░`
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
