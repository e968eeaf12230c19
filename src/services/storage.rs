//! Persistence of the activity collection.
//!
//! The storage contract is deliberately small: [`ActivityStore::load`] never
//! fails (missing or unreadable data yields an empty collection) and
//! [`ActivityStore::save`] reports a [`SortError::Persistence`] when the write
//! does not go through.
//!
//! Loading also migrates older records to the current shape and repairs
//! integrity problems. Repairs are reported as [`IntegrityWarning`]s and the
//! repaired collection is written back immediately on a best-effort basis.

use crate::constants::STORAGE_FILE_NAME;
use crate::error::{SortError, SortResult};
use crate::models::{
    Activity, ActivityCollection, Category, ImageRef, Item, Location, Orientation,
};
use crate::services::placement;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Storage collaborator holding the serialized collection.
pub trait ActivityStore {
    /// Reads the persisted collection; empty if nothing usable is stored.
    fn load(&self) -> ActivityCollection;

    /// Replaces the persisted collection.
    fn save(&self, collection: &ActivityCollection) -> SortResult<()>;

    /// Removes everything persisted.
    fn clear(&self) -> SortResult<()>;
}

/// A non-fatal problem repaired while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// An item had no image and was dropped.
    EmptyImage {
        /// Owning activity
        activity: String,
        /// Dropped item
        item: String,
    },
    /// An item referenced a category that no longer exists; it was moved to the tray.
    DanglingLocation {
        /// Owning activity
        activity: String,
        /// Relocated item
        item: String,
        /// The missing category id
        category: String,
    },
    /// Orders within a location were not `0..count` and were renumbered.
    OrderGap {
        /// Affected activity
        activity: String,
    },
    /// The creation timestamp was missing or unreadable and was reset.
    MissingTimestamp {
        /// Affected activity
        activity: String,
    },
    /// A record had no id and was dropped.
    MissingId {
        /// Owning activity; `None` when the activity itself had no id
        activity: Option<String>,
        /// Kind of record: `"activity"`, `"category"` or `"item"`
        record: &'static str,
        /// Position of the record in its stored list
        index: usize,
    },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage { activity, item } => {
                write!(f, "removed item {item} with empty image from activity {activity}")
            }
            Self::DanglingLocation {
                activity,
                item,
                category,
            } => write!(
                f,
                "moved item {item} of activity {activity} to the tray (category {category} is gone)"
            ),
            Self::OrderGap { activity } => {
                write!(f, "renumbered item orders in activity {activity}")
            }
            Self::MissingTimestamp { activity } => {
                write!(f, "reset missing creation time of activity {activity}")
            }
            Self::MissingId {
                activity: Some(activity),
                record,
                index,
            } => write!(f, "dropped {record} #{index} with no id from activity {activity}"),
            Self::MissingId {
                activity: None,
                record,
                index,
            } => write!(f, "dropped {record} #{index} with no id"),
        }
    }
}

/// Result of decoding persisted data.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    /// The normalized collection
    pub collection: ActivityCollection,
    /// Repairs that were applied
    pub warnings: Vec<IntegrityWarning>,
    /// True if older record shapes were converted
    pub migrated: bool,
}

/// Serializes a collection in the persisted JSON format.
pub fn encode(collection: &ActivityCollection) -> SortResult<String> {
    serde_json::to_string_pretty(collection)
        .map_err(|e| SortError::persistence("serializing activities", e))
}

/// Parses persisted JSON, migrating and repairing it.
///
/// Unparseable input decodes to an empty collection.
pub fn decode(raw: &str) -> Decoded {
    if raw.trim().is_empty() {
        return Decoded::default();
    }

    let stored: StoredCollection = match serde_json::from_str(raw) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "stored activities are unreadable, starting empty");
            return Decoded::default();
        }
    };

    let mut decoded = Decoded::default();
    for (index, activity) in stored.activities.into_iter().enumerate() {
        if activity.id.trim().is_empty() {
            decoded.warnings.push(IntegrityWarning::MissingId {
                activity: None,
                record: "activity",
                index,
            });
            continue;
        }
        let activity = migrate_activity(activity, &mut decoded);
        decoded.collection.activities.push(activity);
    }

    if decoded.migrated {
        info!("converted older activity records to the current format");
    }
    for warning in &decoded.warnings {
        warn!(%warning, "integrity repair");
    }
    decoded
}

#[derive(Deserialize)]
struct StoredCollection {
    #[serde(default)]
    activities: Vec<StoredActivity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredActivity {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    orientation: Option<Orientation>,
    #[serde(default)]
    show_headers: Option<bool>,
    #[serde(default, alias = "columns")]
    categories: Vec<StoredCategory>,
    #[serde(default)]
    items: Vec<StoredItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCategory {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    header_image_path: Option<String>,
    #[serde(default)]
    color_index: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    image_path: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    current_location: Option<String>,
    #[serde(default)]
    order: Option<usize>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn migrate_activity(stored: StoredActivity, decoded: &mut Decoded) -> Activity {
    let activity_id = stored.id;

    let created_at = stored
        .created_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc));
    let created_at = created_at.unwrap_or_else(|| {
        decoded.warnings.push(IntegrityWarning::MissingTimestamp {
            activity: activity_id.clone(),
        });
        Utc::now()
    });

    if stored.orientation.is_none() || stored.show_headers.is_none() {
        decoded.migrated = true;
    }

    let categories: Vec<Category> = stored
        .categories
        .into_iter()
        .enumerate()
        .filter_map(|(index, c)| {
            if c.id.trim().is_empty() {
                decoded.warnings.push(IntegrityWarning::MissingId {
                    activity: Some(activity_id.clone()),
                    record: "category",
                    index,
                });
                return None;
            }
            if c.color_index.is_none() {
                decoded.migrated = true;
            }
            Some(Category {
                id: c.id,
                title: c.title,
                header_image: non_empty(c.header_image_path).map(ImageRef::new),
                color_index: c.color_index.unwrap_or(0),
            })
        })
        .collect();

    // Pass 1: validate images and locations; remember which orders are unknown.
    let mut pending: Vec<(Item, bool)> = Vec::new();
    let mut dangling: Vec<Item> = Vec::new();
    for (index, item) in stored.items.into_iter().enumerate() {
        if item.id.trim().is_empty() {
            decoded.warnings.push(IntegrityWarning::MissingId {
                activity: Some(activity_id.clone()),
                record: "item",
                index,
            });
            continue;
        }
        if item.image_path.is_none() && item.image.is_some() {
            decoded.migrated = true;
        }
        let Some(image) = non_empty(item.image_path).or_else(|| non_empty(item.image)) else {
            decoded.warnings.push(IntegrityWarning::EmptyImage {
                activity: activity_id.clone(),
                item: item.id,
            });
            continue;
        };

        let location = Location::from(item.current_location);
        if let Location::InCategory(category) = &location {
            if !categories.iter().any(|c| &c.id == category) {
                decoded.warnings.push(IntegrityWarning::DanglingLocation {
                    activity: activity_id.clone(),
                    item: item.id.clone(),
                    category: category.clone(),
                });
                dangling.push(Item {
                    id: item.id,
                    image: ImageRef::new(image),
                    location: Location::Unsorted,
                    order: 0,
                });
                continue;
            }
        }

        if item.order.is_none() {
            decoded.migrated = true;
        }
        let known = item.order.is_some();
        pending.push((
            Item {
                id: item.id,
                image: ImageRef::new(image),
                location,
                order: item.order.unwrap_or(0),
            },
            known,
        ));
    }

    // Pass 2: missing orders take the item's position within its location.
    let mut seen: HashMap<Location, usize> = HashMap::new();
    let mut items: Vec<Item> = pending
        .into_iter()
        .map(|(mut item, known)| {
            let position = seen.entry(item.location.clone()).or_insert(0);
            if !known {
                item.order = *position;
            }
            *position += 1;
            item
        })
        .collect();

    for item in dangling {
        items = placement::append(&items, item);
    }

    let (items, renumbered) = placement::normalize(&items);
    if renumbered {
        decoded.warnings.push(IntegrityWarning::OrderGap {
            activity: activity_id.clone(),
        });
    }

    Activity {
        id: activity_id,
        title: stored.title,
        created_at,
        orientation: stored.orientation.unwrap_or_default(),
        show_headers: stored.show_headers.unwrap_or(true),
        categories,
        items,
    }
}

/// Stores the collection as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `activities.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STORAGE_FILE_NAME))
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActivityStore for JsonFileStore {
    fn load(&self) -> ActivityCollection {
        if !self.path.exists() {
            return ActivityCollection::default();
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read activities");
                return ActivityCollection::default();
            }
        };

        let decoded = decode(&raw);
        if !decoded.warnings.is_empty() {
            if let Err(e) = self.save(&decoded.collection) {
                warn!(error = %e, "failed to re-save repaired activities");
            }
        }
        info!(
            path = %self.path.display(),
            activities = decoded.collection.len(),
            "loaded activities"
        );
        decoded.collection
    }

    /// Uses temp file + rename so the file is never left half-written.
    fn save(&self, collection: &ActivityCollection) -> SortResult<()> {
        let content = encode(collection)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SortError::persistence(
                    format!("creating data directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|e| {
            SortError::persistence(format!("writing {}", temp_path.display()), e)
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            SortError::persistence(format!("replacing {}", self.path.display()), e)
        })?;

        info!(
            path = %self.path.display(),
            activities = collection.len(),
            "saved activities"
        );
        Ok(())
    }

    fn clear(&self) -> SortResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                SortError::persistence(format!("removing {}", self.path.display()), e)
            })?;
        }
        Ok(())
    }
}

/// In-process store; writes can be made to fail for testing persistence errors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with raw serialized data.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            data: RefCell::new(Some(raw.into())),
            fail_writes: Cell::new(false),
        }
    }

    /// The raw serialized data, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.data.borrow().clone()
    }

    /// Makes subsequent saves and clears fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn check_writable(&self) -> SortResult<()> {
        if self.fail_writes.get() {
            return Err(SortError::persistence(
                "writing memory store",
                std::io::Error::other("store is read-only"),
            ));
        }
        Ok(())
    }
}

impl ActivityStore for MemoryStore {
    fn load(&self) -> ActivityCollection {
        let Some(raw) = self.raw() else {
            return ActivityCollection::default();
        };
        let decoded = decode(&raw);
        if !decoded.warnings.is_empty() {
            if let Err(e) = self.save(&decoded.collection) {
                warn!(error = %e, "failed to re-save repaired activities");
            }
        }
        decoded.collection
    }

    fn save(&self, collection: &ActivityCollection) -> SortResult<()> {
        self.check_writable()?;
        let content = encode(collection)?;
        *self.data.borrow_mut() = Some(content);
        Ok(())
    }

    fn clear(&self) -> SortResult<()> {
        self.check_writable()?;
        *self.data.borrow_mut() = None;
        Ok(())
    }
}
