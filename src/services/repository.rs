//! The activity repository: in-memory state plus its collaborators.
//!
//! Every mutation follows the same path: apply the engine transformation to the
//! in-memory collection, then save. A failed save is returned to the caller but
//! the in-memory update stays in place (optimistic local update, best-effort
//! persistence). Unknown activity ids are silent no-ops like every other
//! unknown id.

use crate::error::{SortError, SortResult};
use crate::models::{Activity, ActivityCollection, ImageRef, Location, Orientation};
use crate::services::activity::ActivityEngine;
use crate::services::images::{ImageAcquisition, ImageKind, ImageStore};
use crate::services::storage::ActivityStore;
use std::path::Path;
use tracing::{debug, info};

/// Owns the loaded activities for one session of the application.
#[derive(Debug)]
pub struct ActivityRepository<S: ActivityStore, I: ImageStore> {
    store: S,
    images: I,
    engine: ActivityEngine,
    collection: ActivityCollection,
}

impl<S: ActivityStore, I: ImageStore> ActivityRepository<S, I> {
    /// Loads the persisted collection and starts a session.
    pub fn open(store: S, images: I, engine: ActivityEngine) -> Self {
        let collection = store.load();
        info!(activities = collection.len(), "opened activity repository");
        Self {
            store,
            images,
            engine,
            collection,
        }
    }

    /// Ends the session, handing back the collaborators.
    pub fn close(self) -> (S, I) {
        info!(activities = self.collection.len(), "closed activity repository");
        (self.store, self.images)
    }

    /// All activities in creation order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.collection.activities
    }

    /// Looks up an activity.
    #[must_use]
    pub fn activity(&self, activity_id: &str) -> Option<&Activity> {
        self.collection.get(activity_id)
    }

    /// The engine used for mutations.
    #[must_use]
    pub const fn engine(&self) -> &ActivityEngine {
        &self.engine
    }

    /// The storage collaborator.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn save(&self) -> SortResult<()> {
        self.store.save(&self.collection)
    }

    fn slot(&mut self, activity_id: &str) -> Option<&mut Activity> {
        self.collection
            .activities
            .iter_mut()
            .find(|a| a.id == activity_id)
    }

    /// Applies `change` to one activity and persists the result if it differs.
    fn commit(
        &mut self,
        activity_id: &str,
        change: impl FnOnce(&ActivityEngine, &Activity) -> SortResult<Activity>,
    ) -> SortResult<()> {
        let engine = self.engine;
        let Some(current) = self.slot(activity_id) else {
            debug!(activity = activity_id, "ignoring change to unknown activity");
            return Ok(());
        };

        let updated = change(&engine, current)?;
        if updated == *current {
            return Ok(());
        }
        *current = updated;
        self.save()
    }

    /// Replaces an activity with an already-transformed value (for example the
    /// result of a drag). Unknown ids are ignored.
    pub fn replace(&mut self, activity: Activity) -> SortResult<()> {
        let id = activity.id.clone();
        self.commit(&id, |_, _| Ok(activity))
    }

    /// Creates and stores a new activity, returning its id.
    ///
    /// The activity stays in memory even if the save fails.
    pub fn create_activity<T: AsRef<str>>(
        &mut self,
        title: &str,
        category_titles: &[T],
        orientation: Orientation,
    ) -> SortResult<String> {
        let activity = self
            .engine
            .create_activity(title, category_titles, orientation)?;
        let id = activity.id.clone();
        self.collection.activities.push(activity);
        self.save()?;
        Ok(id)
    }

    /// Deletes an activity together with its images.
    pub fn delete_activity(&mut self, activity_id: &str) -> SortResult<()> {
        if self.activity(activity_id).is_none() {
            return Ok(());
        }
        self.images.release_activity(activity_id);
        self.collection.activities.retain(|a| a.id != activity_id);
        self.save()
    }

    /// Deletes every activity, every image and the persisted data.
    pub fn delete_all(&mut self) -> SortResult<()> {
        for activity in &self.collection.activities {
            self.images.release_activity(&activity.id);
        }
        self.collection.activities.clear();
        self.store.clear()
    }

    /// Appends a category.
    pub fn add_category(&mut self, activity_id: &str, title: &str) -> SortResult<()> {
        self.commit(activity_id, |e, a| Ok(e.add_category(a, title)))
    }

    /// Deletes a category, sending its items to the tray.
    pub fn delete_category(&mut self, activity_id: &str, category_id: &str) -> SortResult<()> {
        self.commit(activity_id, |e, a| Ok(e.delete_category(a, category_id)))
    }

    /// Renames a category.
    pub fn rename_category(
        &mut self,
        activity_id: &str,
        category_id: &str,
        title: &str,
    ) -> SortResult<()> {
        self.commit(activity_id, |e, a| Ok(e.rename_category(a, category_id, title)))
    }

    /// Toggles header display.
    pub fn set_show_headers(&mut self, activity_id: &str, show_headers: bool) -> SortResult<()> {
        self.commit(activity_id, |e, a| Ok(e.set_show_headers(a, show_headers)))
    }

    /// Acquires a header picture for a category, releasing the previous one.
    ///
    /// Returns false if the picker was cancelled or the category is unknown.
    pub fn set_header_image(
        &mut self,
        activity_id: &str,
        category_id: &str,
        source: Option<&Path>,
    ) -> SortResult<bool> {
        let Some(previous) = self
            .activity(activity_id)
            .and_then(|a| a.category(category_id))
            .map(|c| c.header_image.clone())
        else {
            return Ok(false);
        };

        let image = match self.acquire(activity_id, ImageKind::Header, source)? {
            Some(image) => image,
            None => return Ok(false),
        };

        let result = self.commit(activity_id, |e, a| {
            Ok(e.set_header_image(a, category_id, Some(image)))
        });
        if let Some(previous) = previous {
            self.images.release_image(&previous);
        }
        result.map(|()| true)
    }

    fn acquire(
        &self,
        activity_id: &str,
        kind: ImageKind,
        source: Option<&Path>,
    ) -> SortResult<Option<ImageRef>> {
        match self.images.acquire_image(activity_id, kind, source) {
            Ok(ImageAcquisition::Acquired(image)) => Ok(Some(image)),
            Ok(ImageAcquisition::Cancelled) => Ok(None),
            Err(e) => Err(SortError::image(format!("{kind} image for {activity_id}"), e)),
        }
    }

    /// Acquires a picture and adds it to the end of the tray.
    ///
    /// Returns the new item's id, or `None` if nothing was added.
    pub fn add_item(
        &mut self,
        activity_id: &str,
        source: Option<&Path>,
    ) -> SortResult<Option<String>> {
        if self.activity(activity_id).is_none() {
            return Ok(None);
        }
        let Some(image) = self.acquire(activity_id, ImageKind::Item, source)? else {
            return Ok(None);
        };

        let mut new_id = None;
        self.commit(activity_id, |e, a| {
            let updated = e.add_item(a, image)?;
            new_id = updated.items.last().map(|i| i.id.clone());
            Ok(updated)
        })?;
        Ok(new_id)
    }

    /// Deletes an item and its picture.
    pub fn delete_item(&mut self, activity_id: &str, item_id: &str) -> SortResult<()> {
        let Some(image) = self
            .activity(activity_id)
            .and_then(|a| a.item(item_id))
            .map(|i| i.image.clone())
        else {
            return Ok(());
        };

        let result = self.commit(activity_id, |e, a| Ok(e.delete_item(a, item_id)));
        self.images.release_image(&image);
        result
    }

    /// Moves an item to the end of `target`.
    pub fn move_item(
        &mut self,
        activity_id: &str,
        item_id: &str,
        target: &Location,
    ) -> SortResult<()> {
        self.commit(activity_id, |e, a| Ok(e.move_item(a, item_id, target)))
    }

    /// Moves an item to a slot within `target`.
    pub fn move_item_with_order(
        &mut self,
        activity_id: &str,
        item_id: &str,
        target: &Location,
        target_order: usize,
    ) -> SortResult<()> {
        self.commit(activity_id, |e, a| {
            Ok(e.move_item_with_order(a, item_id, target, target_order))
        })
    }

    /// Sends every item back to the tray.
    pub fn reset_placements(&mut self, activity_id: &str) -> SortResult<()> {
        self.commit(activity_id, |e, a| Ok(e.reset_placements(a)))
    }

    /// Removes every item and its picture.
    pub fn clear_all_items(&mut self, activity_id: &str) -> SortResult<()> {
        let images: Vec<ImageRef> = self
            .activity(activity_id)
            .map(|a| a.items.iter().map(|i| i.image.clone()).collect())
            .unwrap_or_default();

        let result = self.commit(activity_id, |e, a| Ok(e.clear_all_items(a)));
        for image in &images {
            self.images.release_image(image);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;
    use anyhow::Result;
    use std::cell::RefCell;

    /// Hands out predictable handles and records releases.
    #[derive(Debug, Default)]
    struct FakeImages {
        counter: RefCell<usize>,
        released: RefCell<Vec<String>>,
    }

    impl ImageStore for FakeImages {
        fn acquire_image(
            &self,
            activity_id: &str,
            kind: ImageKind,
            source: Option<&Path>,
        ) -> Result<ImageAcquisition> {
            if source.is_none() {
                return Ok(ImageAcquisition::Cancelled);
            }
            let mut counter = self.counter.borrow_mut();
            *counter += 1;
            Ok(ImageAcquisition::Acquired(ImageRef::new(format!(
                "mem://{activity_id}/{kind}/{}",
                *counter
            ))))
        }

        fn release_image(&self, image: &ImageRef) {
            self.released.borrow_mut().push(image.to_string());
        }

        fn release_activity(&self, activity_id: &str) {
            self.released.borrow_mut().push(format!("mem://{activity_id}/"));
        }
    }

    fn open() -> ActivityRepository<MemoryStore, FakeImages> {
        ActivityRepository::open(
            MemoryStore::new(),
            FakeImages::default(),
            ActivityEngine::default(),
        )
    }

    fn picked() -> Option<&'static Path> {
        Some(Path::new("picked.jpg"))
    }

    #[test]
    fn test_create_activity_persists() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round", "Square"], Orientation::Column)
            .unwrap();

        let (store, _) = repo.close();
        let reopened = ActivityRepository::open(store, FakeImages::default(), ActivityEngine::default());
        assert_eq!(reopened.activity(&id).unwrap().categories.len(), 2);
    }

    #[test]
    fn test_add_and_move_items() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round", "Square"], Orientation::Column)
            .unwrap();
        let first = repo.add_item(&id, picked()).unwrap().unwrap();
        let second = repo.add_item(&id, picked()).unwrap().unwrap();
        let category = repo.activity(&id).unwrap().categories[0].id.clone();

        repo.move_item(&id, &first, &Location::category(category.clone()))
            .unwrap();
        let activity = repo.activity(&id).unwrap();
        assert_eq!(activity.item(&first).unwrap().location, Location::category(category));
        assert_eq!(activity.item(&second).unwrap().order, 0);
    }

    #[test]
    fn test_add_item_cancelled() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round"], Orientation::Row)
            .unwrap();
        assert_eq!(repo.add_item(&id, None).unwrap(), None);
        assert!(repo.activity(&id).unwrap().items.is_empty());
        assert_eq!(repo.add_item("ghost", picked()).unwrap(), None);
    }

    #[test]
    fn test_persistence_failure_keeps_memory() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round"], Orientation::Column)
            .unwrap();
        let saved = repo.store().raw();

        repo.store().set_fail_writes(true);
        let err = repo.add_category(&id, "Square").unwrap_err();
        assert!(err.is_persistence());

        assert_eq!(repo.activity(&id).unwrap().categories.len(), 2);
        assert_eq!(repo.store().raw(), saved);
    }

    #[test]
    fn test_unknown_activity_is_noop() {
        let mut repo = open();
        repo.store().set_fail_writes(true);
        assert!(repo.add_category("ghost", "X").is_ok());
        assert!(repo.reset_placements("ghost").is_ok());
        assert!(repo.delete_activity("ghost").is_ok());
    }

    #[test]
    fn test_delete_item_releases_image() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round"], Orientation::Column)
            .unwrap();
        let item = repo.add_item(&id, picked()).unwrap().unwrap();
        let image = repo.activity(&id).unwrap().item(&item).unwrap().image.clone();

        repo.delete_item(&id, &item).unwrap();
        assert!(repo.activity(&id).unwrap().items.is_empty());
        let (_, images) = repo.close();
        assert_eq!(images.released.borrow().as_slice(), &[image.to_string()]);
    }

    #[test]
    fn test_header_image_replaces_previous() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round"], Orientation::Column)
            .unwrap();
        let category = repo.activity(&id).unwrap().categories[0].id.clone();

        assert!(repo.set_header_image(&id, &category, picked()).unwrap());
        let first = repo.activity(&id).unwrap().categories[0]
            .header_image
            .clone()
            .unwrap();
        assert!(repo.set_header_image(&id, &category, picked()).unwrap());
        assert!(!repo.set_header_image(&id, &category, None).unwrap());
        assert!(!repo.set_header_image(&id, "ghost", picked()).unwrap());

        let (_, images) = repo.close();
        assert_eq!(images.released.borrow().as_slice(), &[first.to_string()]);
    }

    #[test]
    fn test_clear_and_delete_all() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round"], Orientation::Column)
            .unwrap();
        repo.add_item(&id, picked()).unwrap();
        repo.add_item(&id, picked()).unwrap();

        repo.clear_all_items(&id).unwrap();
        assert!(repo.activity(&id).unwrap().items.is_empty());

        repo.delete_all().unwrap();
        assert!(repo.activities().is_empty());
        assert!(repo.store().raw().is_none());
    }

    #[test]
    fn test_replace_commits_external_value() {
        let mut repo = open();
        let id = repo
            .create_activity("Shapes", &["Round"], Orientation::Column)
            .unwrap();
        let renamed = Activity {
            title: "Circles".to_string(),
            ..repo.activity(&id).unwrap().clone()
        };
        repo.replace(renamed).unwrap();
        assert_eq!(repo.activity(&id).unwrap().title, "Circles");
    }
}
