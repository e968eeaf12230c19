//! Sortable picture items and their placement.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque handle to image data owned by the image collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wraps a handle string.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// The raw handle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty handle never belongs to a valid item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an item currently sits.
///
/// Persisted as `currentLocation`: `null` for the tray, the category id otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Location {
    /// In the unsorted tray
    #[default]
    Unsorted,
    /// In the category with this id
    InCategory(String),
}

impl Location {
    /// Location for the category `id`.
    pub fn category(id: impl Into<String>) -> Self {
        Self::InCategory(id.into())
    }

    /// Category id, if any.
    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        match self {
            Self::Unsorted => None,
            Self::InCategory(id) => Some(id),
        }
    }

    /// True for the tray.
    #[must_use]
    pub const fn is_unsorted(&self) -> bool {
        matches!(self, Self::Unsorted)
    }
}

impl From<Option<String>> for Location {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) if !id.is_empty() => Self::InCategory(id),
            _ => Self::Unsorted,
        }
    }
}

impl From<Location> for Option<String> {
    fn from(value: Location) -> Self {
        match value {
            Location::Unsorted => None,
            Location::InCategory(id) => Some(id),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsorted => f.write_str("tray"),
            Self::InCategory(id) => write!(f, "category {id}"),
        }
    }
}

/// A picture to be sorted.
///
/// `order` is the item's position within its location; orders within one
/// location always form `0..count` once a mutation completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Picture handle
    #[serde(rename = "imagePath")]
    pub image: ImageRef,
    /// Placement owner
    #[serde(rename = "currentLocation")]
    pub location: Location,
    /// Position within `location`
    pub order: usize,
}

impl Item {
    /// Creates an item in the tray at `order` with a fresh id.
    pub fn new(image: ImageRef, order: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            image,
            location: Location::Unsorted,
            order,
        }
    }

    /// True if the item sits in `location`.
    #[must_use]
    pub fn is_in(&self, location: &Location) -> bool {
        &self.location == location
    }
}
