//! Ordered placement of items across the tray and categories.
//!
//! Every function here is a pure transformation from an item list to a new item
//! list. After any of them returns, the orders of the items sharing one
//! location form exactly `0..count`.
//!
//! The explicit-position move is the single canonical algorithm; the append
//! move is expressed through it with the target's current size as the slot.

use crate::models::{Item, Location};
use std::collections::HashMap;

/// Order the next item appended to `location` would receive.
///
/// The item `excluding` (usually the one being moved) is not counted.
#[must_use]
pub fn next_order(items: &[Item], location: &Location, excluding: Option<&str>) -> usize {
    items
        .iter()
        .filter(|i| i.is_in(location) && Some(i.id.as_str()) != excluding)
        .map(|i| i.order + 1)
        .max()
        .unwrap_or(0)
}

/// Number of items in `location` other than `item_id`.
///
/// This is the last valid slot for moving `item_id` into `location`: the
/// source gap is closed before the slot is taken, so the mover's own order
/// must not be counted even when it already sits in `location`.
#[must_use]
pub fn slot_count(items: &[Item], location: &Location, item_id: &str) -> usize {
    items
        .iter()
        .filter(|i| i.is_in(location) && i.id != item_id)
        .count()
}

/// Moves `item_id` into `target` at slot `target_order`.
///
/// 1. Items after the mover in its source location shift down by one.
/// 2. Items in `target` at or after `target_order` shift up by one.
/// 3. The mover takes `target_order` in `target`.
///
/// `target_order` is not bounds-checked; callers clamp it to the target's size.
/// Unknown ids and moves onto the current slot return the items unchanged.
#[must_use]
pub fn move_to_position(
    items: &[Item],
    item_id: &str,
    target: &Location,
    target_order: usize,
) -> Vec<Item> {
    let Some(moving) = items.iter().find(|i| i.id == item_id) else {
        return items.to_vec();
    };

    if moving.location == *target && moving.order == target_order {
        return items.to_vec();
    }

    let source = moving.location.clone();
    let source_order = moving.order;

    let mut updated = items.to_vec();

    for item in updated.iter_mut().filter(|i| i.id != item_id) {
        if item.location == source && item.order > source_order {
            item.order -= 1;
        }
    }

    for item in updated.iter_mut().filter(|i| i.id != item_id) {
        if item.location == *target && item.order >= target_order {
            item.order += 1;
        }
    }

    if let Some(item) = updated.iter_mut().find(|i| i.id == item_id) {
        item.location = target.clone();
        item.order = target_order;
    }

    updated
}

/// Moves `item_id` to the end of `target`.
#[must_use]
pub fn move_to_end(items: &[Item], item_id: &str, target: &Location) -> Vec<Item> {
    let slot = slot_count(items, target, item_id);
    move_to_position(items, item_id, target, slot)
}

/// Adds `item` at the end of its location, overriding its order.
#[must_use]
pub fn append(items: &[Item], mut item: Item) -> Vec<Item> {
    item.order = next_order(items, &item.location, None);
    let mut updated = items.to_vec();
    updated.push(item);
    updated
}

/// Removes `item_id` and closes the gap it leaves behind.
#[must_use]
pub fn remove(items: &[Item], item_id: &str) -> Vec<Item> {
    let Some(removed) = items.iter().find(|i| i.id == item_id) else {
        return items.to_vec();
    };
    let location = removed.location.clone();
    let order = removed.order;

    items
        .iter()
        .filter(|i| i.id != item_id)
        .map(|i| {
            let mut item = i.clone();
            if item.location == location && item.order > order {
                item.order -= 1;
            }
            item
        })
        .collect()
}

/// Sends every item in `from` to the end of `to`, keeping their relative order.
#[must_use]
pub fn relocate_all(items: &[Item], from: &Location, to: &Location) -> Vec<Item> {
    let mut moving: Vec<&Item> = items.iter().filter(|i| i.is_in(from)).collect();
    moving.sort_by_key(|i| i.order);
    let ids: Vec<String> = moving.iter().map(|i| i.id.clone()).collect();

    ids.iter()
        .fold(items.to_vec(), |acc, id| move_to_end(&acc, id, to))
}

/// Moves every item to the tray, numbered by a stable sort on previous order.
#[must_use]
pub fn reset_all(items: &[Item]) -> Vec<Item> {
    let mut indexed: Vec<(usize, &Item)> = items.iter().enumerate().collect();
    indexed.sort_by_key(|(_, item)| item.order);

    let mut new_orders = vec![0; items.len()];
    for (rank, (index, _)) in indexed.iter().enumerate() {
        new_orders[*index] = rank;
    }

    items
        .iter()
        .zip(new_orders)
        .map(|(item, order)| Item {
            location: Location::Unsorted,
            order,
            ..item.clone()
        })
        .collect()
}

/// Renumbers each location to `0..count`, ordering by `(order, list position)`.
///
/// Returns the new items and whether anything changed.
#[must_use]
pub fn normalize(items: &[Item]) -> (Vec<Item>, bool) {
    let mut groups: HashMap<&Location, Vec<(usize, usize)>> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        groups
            .entry(&item.location)
            .or_default()
            .push((item.order, index));
    }

    let mut new_orders = vec![0; items.len()];
    for members in groups.values_mut() {
        members.sort_unstable();
        for (rank, (_, index)) in members.iter().enumerate() {
            new_orders[*index] = rank;
        }
    }

    let mut changed = false;
    let updated: Vec<Item> = items
        .iter()
        .zip(new_orders)
        .map(|(item, order)| {
            if item.order != order {
                changed = true;
            }
            Item {
                order,
                ..item.clone()
            }
        })
        .collect();

    (updated, changed)
}

/// True if every location's orders are exactly `0..count`.
#[must_use]
pub fn is_contiguous(items: &[Item]) -> bool {
    let mut groups: HashMap<&Location, Vec<usize>> = HashMap::new();
    for item in items {
        groups.entry(&item.location).or_default().push(item.order);
    }

    groups.values_mut().all(|orders| {
        orders.sort_unstable();
        orders.iter().enumerate().all(|(expected, &order)| expected == order)
    })
}
