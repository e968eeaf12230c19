//! Activity mutations.
//!
//! [`ActivityEngine`] exposes every change to an [`Activity`] as a
//! copy-on-write transformation: the input is never modified and a new value is
//! returned for the caller to commit. Unknown item or category ids leave the
//! activity untouched. Ordering math is delegated to [`placement`].

use crate::error::{SortError, SortResult};
use crate::models::{Activity, Category, ImageRef, Item, Location, Orientation};
use crate::services::placement;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

/// How far categories may be deleted.
///
/// The UI variants disagree on whether one or two categories must remain, so
/// the minimum is a policy value rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPolicy {
    /// Deleting is refused once an activity has this many categories.
    pub min_categories: usize,
}

impl CategoryPolicy {
    /// Policy keeping at least `min_categories`.
    #[must_use]
    pub const fn new(min_categories: usize) -> Self {
        Self { min_categories }
    }

    /// Whether one more category may be removed from `activity`.
    #[must_use]
    pub fn can_delete(&self, activity: &Activity) -> bool {
        activity.categories.len() > self.min_categories
    }
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pure operations on activities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityEngine {
    policy: CategoryPolicy,
}

impl ActivityEngine {
    /// Creates an engine enforcing `policy`.
    #[must_use]
    pub const fn new(policy: CategoryPolicy) -> Self {
        Self { policy }
    }

    /// The category policy in force.
    #[must_use]
    pub const fn policy(&self) -> CategoryPolicy {
        self.policy
    }

    /// Builds a new activity with one category per title and no items.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::Validation`] if `category_titles` is empty.
    pub fn create_activity<S: AsRef<str>>(
        &self,
        title: &str,
        category_titles: &[S],
        orientation: Orientation,
    ) -> SortResult<Activity> {
        if category_titles.is_empty() {
            return Err(SortError::validation(
                "an activity needs at least one category",
            ));
        }

        let categories = category_titles
            .iter()
            .enumerate()
            .map(|(index, t)| Category::new(t.as_ref(), index))
            .collect();

        let activity = Activity {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            created_at: Utc::now(),
            orientation,
            show_headers: true,
            categories,
            items: Vec::new(),
        };
        debug!(activity = %activity.id, categories = category_titles.len(), "created activity");
        Ok(activity)
    }

    /// Appends a category whose colour follows the current category count.
    pub fn add_category(&self, activity: &Activity, title: &str) -> Activity {
        let category = Category::new(title, activity.categories.len());
        debug!(activity = %activity.id, category = %category.id, "added category");

        let mut updated = activity.clone();
        updated.categories.push(category);
        updated
    }

    /// Removes a category, sending its items to the end of the tray.
    ///
    /// Refused (no-op) if the policy minimum would be crossed.
    pub fn delete_category(&self, activity: &Activity, category_id: &str) -> Activity {
        if activity.category(category_id).is_none() {
            return activity.clone();
        }
        if !self.policy.can_delete(activity) {
            debug!(
                activity = %activity.id,
                min = self.policy.min_categories,
                "category delete refused by policy"
            );
            return activity.clone();
        }

        let items = placement::relocate_all(
            &activity.items,
            &Location::category(category_id),
            &Location::Unsorted,
        );
        debug!(activity = %activity.id, category = category_id, "deleted category");

        Activity {
            categories: activity
                .categories
                .iter()
                .filter(|c| c.id != category_id)
                .cloned()
                .collect(),
            items,
            ..activity.clone()
        }
    }

    /// Changes a category title.
    pub fn rename_category(&self, activity: &Activity, category_id: &str, title: &str) -> Activity {
        self.update_category(activity, category_id, |c| c.title = title.to_string())
    }

    /// Sets or clears a category header image.
    pub fn set_header_image(
        &self,
        activity: &Activity,
        category_id: &str,
        image: Option<ImageRef>,
    ) -> Activity {
        self.update_category(activity, category_id, |c| c.header_image = image)
    }

    /// Toggles category header display.
    pub fn set_show_headers(&self, activity: &Activity, show_headers: bool) -> Activity {
        Activity {
            show_headers,
            ..activity.clone()
        }
    }

    fn update_category(
        &self,
        activity: &Activity,
        category_id: &str,
        update: impl FnOnce(&mut Category),
    ) -> Activity {
        let mut updated = activity.clone();
        if let Some(category) = updated.categories.iter_mut().find(|c| c.id == category_id) {
            update(category);
        }
        updated
    }

    /// Adds a new item at the end of the tray.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::Validation`] for an empty image reference.
    pub fn add_item(&self, activity: &Activity, image: ImageRef) -> SortResult<Activity> {
        if image.is_empty() {
            return Err(SortError::validation("an item needs an image"));
        }

        let item = Item::new(image, 0);
        debug!(activity = %activity.id, item = %item.id, "added item");
        Ok(Activity {
            items: placement::append(&activity.items, item),
            ..activity.clone()
        })
    }

    /// Removes an item and compacts its former location.
    pub fn delete_item(&self, activity: &Activity, item_id: &str) -> Activity {
        Activity {
            items: placement::remove(&activity.items, item_id),
            ..activity.clone()
        }
    }

    /// Moves an item to the end of `target`.
    ///
    /// Dropping an item onto the location it already occupies changes nothing.
    pub fn move_item(&self, activity: &Activity, item_id: &str, target: &Location) -> Activity {
        let Some(item) = activity.item(item_id) else {
            return activity.clone();
        };
        if item.location == *target || !activity.location_exists(target) {
            return activity.clone();
        }

        debug!(activity = %activity.id, item = item_id, %target, "moved item");
        Activity {
            items: placement::move_to_end(&activity.items, item_id, target),
            ..activity.clone()
        }
    }

    /// Moves an item to slot `target_order` of `target`.
    ///
    /// Slots past the end of the target are treated as an append.
    pub fn move_item_with_order(
        &self,
        activity: &Activity,
        item_id: &str,
        target: &Location,
        target_order: usize,
    ) -> Activity {
        if activity.item(item_id).is_none() || !activity.location_exists(target) {
            return activity.clone();
        }

        let slot = target_order.min(placement::slot_count(&activity.items, target, item_id));
        debug!(activity = %activity.id, item = item_id, %target, slot, "moved item to slot");
        Activity {
            items: placement::move_to_position(&activity.items, item_id, target, slot),
            ..activity.clone()
        }
    }

    /// Sends every item back to the tray.
    pub fn reset_placements(&self, activity: &Activity) -> Activity {
        Activity {
            items: placement::reset_all(&activity.items),
            ..activity.clone()
        }
    }

    /// Removes every item, keeping the categories.
    pub fn clear_all_items(&self, activity: &Activity) -> Activity {
        Activity {
            items: Vec::new(),
            ..activity.clone()
        }
    }
}
