//! Integration tests for JSON persistence, migration and the repository.

mod fixtures;
use fixtures::*;

use sortboard::models::{Location, Orientation};
use sortboard::services::storage::decode;
use sortboard::services::{
    ActivityEngine, ActivityRepository, ActivityStore, FsImageStore, IntegrityWarning,
    JsonFileStore,
};
use std::fs;

/// Shape written by older versions: `columns`, `image`, no orders or timestamps.
const LEGACY_JSON: &str = r#"{
  "activities": [
    {
      "id": "old-1",
      "title": "Animals",
      "columns": [
        { "id": "c-land", "title": "Land" },
        { "id": "c-sea", "title": "Sea", "headerImagePath": "" }
      ],
      "items": [
        { "id": "i-cat", "image": "file:///p/cat.png", "currentLocation": "c-land" },
        { "id": "i-fish", "image": "file:///p/fish.png", "currentLocation": "c-sea" },
        { "id": "i-dog", "image": "file:///p/dog.png", "currentLocation": "c-land" },
        { "id": "i-bird", "image": "file:///p/bird.png", "currentLocation": "c-sky" },
        { "id": "i-blank", "image": "  " },
        { "id": "i-ant", "image": "file:///p/ant.png" }
      ]
    }
  ]
}"#;

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_save_load_save_is_byte_identical() {
    let data_dir = temp_data_dir();
    let path = write_collection(
        data_dir.path(),
        vec![test_activity_sorted(), test_activity(&["Red", "Blue", "Green"], 2)],
    );
    let first = fs::read_to_string(&path).unwrap();

    let store = JsonFileStore::in_dir(data_dir.path());
    store.save(&store.load()).unwrap();
    let second = fs::read_to_string(&path).unwrap();
    store.save(&store.load()).unwrap();
    let third = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_load_returns_saved_activities() {
    let data_dir = temp_data_dir();
    let activity = test_activity_sorted();
    write_collection(data_dir.path(), vec![activity.clone()]);

    let loaded = JsonFileStore::in_dir(data_dir.path()).load();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(ACTIVITY_ID), Some(&activity));
}

#[test]
fn test_persisted_field_names() {
    let data_dir = temp_data_dir();
    let path = write_collection(data_dir.path(), vec![test_activity_sorted()]);
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    let activity = &json["activities"][0];
    assert_eq!(activity["createdAt"], "2025-03-01T09:30:00Z");
    assert_eq!(activity["orientation"], "column");
    assert_eq!(activity["showHeaders"], true);
    assert_eq!(activity["categories"][1]["colorIndex"], 1);
    assert!(activity["categories"][0]["headerImagePath"].is_null());
    assert_eq!(activity["items"][0]["currentLocation"], "cat-0");
    assert!(activity["items"][3]["currentLocation"].is_null());
    assert_eq!(activity["items"][4]["order"], 1);
}

// ============================================================================
// Corrupt and legacy data
// ============================================================================

#[test]
fn test_garbage_file_loads_empty() {
    let data_dir = temp_data_dir();
    let store = JsonFileStore::in_dir(data_dir.path());
    fs::write(store.path(), "{ not json").unwrap();

    assert!(store.load().is_empty());
}

#[test]
fn test_missing_file_loads_empty() {
    let data_dir = temp_data_dir();
    assert!(JsonFileStore::in_dir(data_dir.path()).load().is_empty());
}

#[test]
fn test_legacy_records_are_migrated() {
    let decoded = decode(LEGACY_JSON);
    assert!(decoded.migrated);

    let activity = decoded.collection.get("old-1").unwrap();
    assert_eq!(activity.orientation, Orientation::Column);
    assert!(activity.show_headers);
    assert_eq!(activity.categories.len(), 2);
    assert!(activity.categories[1].header_image.is_none());

    let land = Location::category("c-land");
    assert_eq!(ids_in(activity, &land), vec!["i-cat", "i-dog"]);
    assert_eq!(ids_in(activity, &Location::category("c-sea")), vec!["i-fish"]);
    assert_eq!(ids_in(activity, &Location::Unsorted), vec!["i-ant", "i-bird"]);
    assert!(activity.item("i-blank").is_none());
    assert_contiguous(activity);

    assert!(decoded.warnings.contains(&IntegrityWarning::EmptyImage {
        activity: "old-1".into(),
        item: "i-blank".into(),
    }));
    assert!(decoded.warnings.contains(&IntegrityWarning::DanglingLocation {
        activity: "old-1".into(),
        item: "i-bird".into(),
        category: "c-sky".into(),
    }));
    assert!(decoded
        .warnings
        .contains(&IntegrityWarning::MissingTimestamp {
            activity: "old-1".into()
        }));
}

#[test]
fn test_repaired_data_is_saved_back() {
    let data_dir = temp_data_dir();
    let store = JsonFileStore::in_dir(data_dir.path());
    fs::write(store.path(), LEGACY_JSON).unwrap();

    let first = store.load();
    let rewritten = fs::read_to_string(store.path()).unwrap();
    assert!(rewritten.contains("\"categories\""));
    assert!(!rewritten.contains("i-blank"));

    // The repaired file decodes cleanly.
    let decoded = decode(&rewritten);
    assert!(decoded.warnings.is_empty());
    assert_eq!(decoded.collection, first);
}

#[test]
fn test_record_without_id_does_not_lose_the_rest() {
    let data_dir = temp_data_dir();
    let store = JsonFileStore::in_dir(data_dir.path());
    let mut json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(write_collection(data_dir.path(), vec![test_activity_sorted()]))
            .unwrap(),
    )
    .unwrap();
    json["activities"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({ "title": "Lost", "items": [] }));
    fs::write(store.path(), json.to_string()).unwrap();

    let loaded = store.load();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(ACTIVITY_ID), Some(&test_activity_sorted()));
    let rewritten = fs::read_to_string(store.path()).unwrap();
    assert!(!rewritten.contains("Lost"));
    assert!(decode(&rewritten).warnings.is_empty());
}

// ============================================================================
// Repository on disk
// ============================================================================

#[test]
fn test_repository_persists_across_sessions() {
    let data_dir = temp_data_dir();
    let picture = write_picture(data_dir.path(), "apple.JPG");

    let open = || {
        ActivityRepository::open(
            JsonFileStore::in_dir(data_dir.path()),
            FsImageStore::in_dir(data_dir.path()),
            ActivityEngine::default(),
        )
    };

    let mut repo = open();
    let activity_id = repo
        .create_activity("Snacks", &["Sweet", "Salty"], Orientation::Row)
        .unwrap();
    let item = repo.add_item(&activity_id, Some(&picture)).unwrap().unwrap();
    let sweet = repo.activity(&activity_id).unwrap().categories[0].id.clone();
    repo.move_item(&activity_id, &item, &Location::category(sweet.clone()))
        .unwrap();
    let _ = repo.close();

    let repo = open();
    let activity = repo.activity(&activity_id).unwrap();
    assert_eq!(activity.orientation, Orientation::Row);
    let stored = activity.item(&item).unwrap();
    assert_eq!(stored.location, Location::category(sweet));
    assert_eq!(stored.order, 0);

    let image_path = stored.image.as_str().trim_start_matches("file://");
    assert!(image_path.ends_with(".jpg"));
    assert!(std::path::Path::new(image_path).is_file());
}

#[test]
fn test_delete_activity_removes_images() {
    let data_dir = temp_data_dir();
    let picture = write_picture(data_dir.path(), "pear.png");
    let images = FsImageStore::in_dir(data_dir.path());

    let mut repo = ActivityRepository::open(
        JsonFileStore::in_dir(data_dir.path()),
        images.clone(),
        ActivityEngine::default(),
    );
    let activity_id = repo
        .create_activity("Fruit", &["Green"], Orientation::Column)
        .unwrap();
    repo.add_item(&activity_id, Some(&picture)).unwrap();
    assert!(images.activity_dir(&activity_id).is_dir());

    repo.delete_activity(&activity_id).unwrap();

    assert!(!images.activity_dir(&activity_id).exists());
    assert!(repo.activities().is_empty());
    assert!(picture.is_file());
}

#[test]
fn test_delete_all_removes_data_file() {
    let data_dir = temp_data_dir();
    let path = write_collection(data_dir.path(), vec![test_activity_sorted()]);

    let mut repo = ActivityRepository::open(
        JsonFileStore::in_dir(data_dir.path()),
        FsImageStore::in_dir(data_dir.path()),
        ActivityEngine::default(),
    );
    repo.delete_all().unwrap();

    assert!(!path.exists());
    assert!(repo.activities().is_empty());
}
