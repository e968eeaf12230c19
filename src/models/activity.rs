//! Activity aggregate and the persisted collection of activities.

use crate::models::{Category, Item, Location};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How categories are laid out on screen.
///
/// Only affects the rendering layer's zone mapping, never the placement model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Categories side by side
    #[default]
    Column,
    /// Categories stacked
    Row,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => f.write_str("column"),
            Self::Row => f.write_str("row"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "column" | "columns" => Ok(Self::Column),
            "row" | "rows" => Ok(Self::Row),
            other => Err(format!("unknown orientation '{other}' (expected column or row)")),
        }
    }
}

/// A sorting board: a title, ordered categories and the items being sorted.
///
/// Values are treated as immutable snapshots; the engine returns new values
/// rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display title
    pub title: String,
    /// Creation timestamp, never modified
    pub created_at: DateTime<Utc>,
    /// Column or row layout
    pub orientation: Orientation,
    /// Whether category headers are displayed
    pub show_headers: bool,
    /// Categories in display order
    pub categories: Vec<Category>,
    /// Items in insertion order
    pub items: Vec<Item>,
}

impl Activity {
    /// Looks up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// True if `location` is the tray or an existing category.
    #[must_use]
    pub fn location_exists(&self, location: &Location) -> bool {
        match location {
            Location::Unsorted => true,
            Location::InCategory(id) => self.category(id).is_some(),
        }
    }

    /// Items in `location`, sorted by order.
    #[must_use]
    pub fn items_in(&self, location: &Location) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().filter(|i| i.is_in(location)).collect();
        items.sort_by_key(|i| i.order);
        items
    }

    /// Number of items in `location`.
    #[must_use]
    pub fn count_in(&self, location: &Location) -> usize {
        self.items.iter().filter(|i| i.is_in(location)).count()
    }

    /// Items in the tray, sorted by order.
    #[must_use]
    pub fn unsorted_items(&self) -> Vec<&Item> {
        self.items_in(&Location::Unsorted)
    }
}

/// Every activity known to the application, as persisted by storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityCollection {
    /// Activities in creation order
    pub activities: Vec<Activity>,
}

impl ActivityCollection {
    /// Wraps a list of activities.
    #[must_use]
    pub const fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    /// Looks up an activity by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Number of activities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// True if there are no activities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
