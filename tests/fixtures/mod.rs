//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use chrono::{DateTime, TimeZone, Utc};
use sortboard::models::{
    Activity, ActivityCollection, Category, ImageRef, Item, Location, Orientation,
};
use sortboard::services::placement;
use sortboard::services::{ActivityStore, JsonFileStore};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Id of the activity built by [`test_activity`].
pub const ACTIVITY_ID: &str = "act-fruit";

/// Deterministic creation timestamp.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
}

/// Category id for the `index`-th category of a fixture activity.
pub fn category_id(index: usize) -> String {
    format!("cat-{index}")
}

/// Item id for the `index`-th item of a fixture activity.
pub fn item_id(index: usize) -> String {
    format!("item-{index}")
}

/// Creates an activity with deterministic ids and every item in the tray.
///
/// # Arguments
/// * `categories` - Category titles, in display order
/// * `items` - Number of items (`item-0`..)
pub fn test_activity(categories: &[&str], items: usize) -> Activity {
    let categories = categories
        .iter()
        .enumerate()
        .map(|(index, title)| Category::with_id(category_id(index), *title, index))
        .collect();

    let items = (0..items)
        .map(|index| Item {
            id: item_id(index),
            image: ImageRef::new(format!("file:///pictures/{index}.png")),
            location: Location::Unsorted,
            order: index,
        })
        .collect();

    Activity {
        id: ACTIVITY_ID.to_string(),
        title: "Fruit or Veg".to_string(),
        created_at: fixed_time(),
        orientation: Orientation::Column,
        show_headers: true,
        categories,
        items,
    }
}

/// Fruit/Veg activity with a partly sorted board:
///
/// - `cat-0` (Fruit): `item-0`, `item-1`
/// - `cat-1` (Veg): `item-2`
/// - tray: `item-3`, `item-4`
pub fn test_activity_sorted() -> Activity {
    let mut activity = test_activity(&["Fruit", "Veg"], 5);
    let fruit = Location::category(category_id(0));
    let veg = Location::category(category_id(1));

    for (id, target) in [(0, &fruit), (1, &fruit), (2, &veg)] {
        activity.items = placement::move_to_end(&activity.items, &item_id(id), target);
    }
    activity
}

/// Ids of the items in `location`, in display order.
pub fn ids_in(activity: &Activity, location: &Location) -> Vec<String> {
    activity
        .items_in(location)
        .into_iter()
        .map(|i| i.id.clone())
        .collect()
}

/// Asserts every location of `activity` is numbered `0..count`.
pub fn assert_contiguous(activity: &Activity) {
    assert!(
        placement::is_contiguous(&activity.items),
        "orders are not contiguous: {:?}",
        activity
            .items
            .iter()
            .map(|i| (&i.id, &i.location, i.order))
            .collect::<Vec<_>>()
    );
}

/// Creates an empty temporary data directory.
pub fn temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Persists `activities` into `data_dir` the way the application does.
///
/// # Returns
/// Path of the written `activities.json`.
pub fn write_collection(data_dir: &Path, activities: Vec<Activity>) -> PathBuf {
    let store = JsonFileStore::in_dir(data_dir);
    store
        .save(&ActivityCollection::new(activities))
        .expect("Failed to write activities");
    store.path().to_path_buf()
}

/// Writes a fake picture file and returns its path.
pub fn write_picture(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\x89PNG fake picture").expect("Failed to write picture");
    path
}
