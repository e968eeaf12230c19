//! Sorting categories (rendered as columns or rows).

use crate::models::color_palette::{category_color, color_index_for};
use crate::models::{ImageRef, RgbColor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A labeled bucket that items can be sorted into.
///
/// The `id` never changes once created. `color_index` is assigned from the
/// category's sequence number at creation and is not recomputed when other
/// categories are removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display label
    pub title: String,
    /// Optional header picture
    #[serde(rename = "headerImagePath")]
    pub header_image: Option<ImageRef>,
    /// Palette slot (0-5)
    pub color_index: usize,
}

impl Category {
    /// Creates a category for the `sequence`-th position with a fresh id.
    pub fn new(title: impl Into<String>, sequence: usize) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, sequence)
    }

    /// Creates a category with an explicit id.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>, sequence: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            header_image: None,
            color_index: color_index_for(sequence),
        }
    }

    /// Colour of this category's palette slot.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        category_color(self.color_index)
    }
}
