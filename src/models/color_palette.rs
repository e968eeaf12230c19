//! Category colour palette.
//!
//! Six high-contrast colours; a category's `color_index` picks one of them and
//! is assigned as `sequence_number % PALETTE_SIZE`.

use super::RgbColor;
use crate::constants::PALETTE_SIZE;

/// The category colours in palette order.
pub const CATEGORY_COLORS: [RgbColor; PALETTE_SIZE] = [
    RgbColor::new(0xEF, 0x53, 0x50), // Red
    RgbColor::new(0x42, 0xA5, 0xF5), // Blue
    RgbColor::new(0x66, 0xBB, 0x6A), // Green
    RgbColor::new(0xFF, 0xA7, 0x26), // Orange
    RgbColor::new(0xAB, 0x47, 0xBC), // Purple
    RgbColor::new(0x26, 0xC6, 0xDA), // Cyan
];

/// Display names matching [`CATEGORY_COLORS`].
pub const CATEGORY_COLOR_NAMES: [&str; PALETTE_SIZE] =
    ["Red", "Blue", "Green", "Orange", "Purple", "Cyan"];

/// Palette slot for the `sequence`-th category.
#[must_use]
pub const fn color_index_for(sequence: usize) -> usize {
    sequence % PALETTE_SIZE
}

/// Colour for a stored `color_index`. Out-of-range indices wrap.
#[must_use]
pub const fn category_color(color_index: usize) -> RgbColor {
    CATEGORY_COLORS[color_index % PALETTE_SIZE]
}

/// Name of the colour for a stored `color_index`.
#[must_use]
pub const fn category_color_name(color_index: usize) -> &'static str {
    CATEGORY_COLOR_NAMES[color_index % PALETTE_SIZE]
}
