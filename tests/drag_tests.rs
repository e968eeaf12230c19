//! Integration tests for drop zone resolution and drag gestures.

mod fixtures;
use fixtures::*;

use sortboard::models::Location;
use sortboard::services::ActivityEngine;
use sortboard::sorting::{
    DeleteRequest, DragCoordinator, DragObserver, DropOutcome, DropZoneRegistry, NoopObserver,
    Point, Rect, ZoneId,
};

/// Two category columns above a tray, as a column-oriented board lays them out.
fn column_board() -> DropZoneRegistry {
    let mut registry = DropZoneRegistry::new();
    registry.register_zone(
        ZoneId::category(category_id(0)),
        Rect::new(0.0, 0.0, 200.0, 600.0),
    );
    registry.register_zone(
        ZoneId::category(category_id(1)),
        Rect::new(200.0, 0.0, 200.0, 600.0),
    );
    registry.register_zone(ZoneId::Tray, Rect::new(0.0, 600.0, 400.0, 200.0));
    registry
}

fn drag(
    coordinator: &mut DragCoordinator<impl DragObserver>,
    item: &str,
    to: Point,
    registry: &DropZoneRegistry,
) -> DropOutcome {
    let activity = test_activity_sorted();
    assert!(coordinator.begin(item, Point::new(100.0, 700.0)));
    coordinator.update(item, to);
    coordinator.end(item, to, &activity, registry, &ActivityEngine::default())
}

#[test]
fn test_drop_into_category_moves_item_to_end() {
    let registry = column_board();
    let mut coordinator = DragCoordinator::new(NoopObserver);

    let outcome = drag(&mut coordinator, &item_id(3), Point::new(250.0, 300.0), &registry);

    let DropOutcome::Dropped { zone, activity } = outcome else {
        panic!("expected a drop, got {outcome:?}");
    };
    assert_eq!(zone, ZoneId::category(category_id(1)));
    let veg = Location::category(category_id(1));
    assert_eq!(ids_in(&activity, &veg), vec![item_id(2), item_id(3)]);
    assert_eq!(ids_in(&activity, &Location::Unsorted), vec![item_id(4)]);
    assert_contiguous(&activity);
    assert!(!coordinator.is_dragging(&item_id(3)));
}

#[test]
fn test_drop_outside_every_zone_changes_nothing() {
    let registry = column_board();
    let mut coordinator = DragCoordinator::new(NoopObserver);

    let outcome = drag(&mut coordinator, &item_id(0), Point::new(900.0, 900.0), &registry);

    assert_eq!(outcome, DropOutcome::Missed);
    assert!(outcome.into_activity().is_none());
}

#[test]
fn test_shared_edge_resolves_to_first_registered() {
    let registry = column_board();

    assert_eq!(
        registry.find_zone_at_point(200.0, 300.0),
        Some(&ZoneId::category(category_id(0)))
    );
    assert_eq!(
        registry.find_zone_at_point(100.0, 600.0),
        Some(&ZoneId::category(category_id(0)))
    );
    assert_eq!(registry.find_zone_at_point(100.0, 601.0), Some(&ZoneId::Tray));
}

#[test]
fn test_drop_back_on_own_zone_keeps_placement() {
    let registry = column_board();
    let mut coordinator = DragCoordinator::new(NoopObserver);

    let outcome = drag(&mut coordinator, &item_id(0), Point::new(50.0, 50.0), &registry);

    let DropOutcome::Dropped { activity, .. } = outcome else {
        panic!("expected a drop");
    };
    assert_eq!(activity, test_activity_sorted());
}

#[test]
fn test_end_without_begin_is_ignored() {
    let registry = column_board();
    let mut coordinator = DragCoordinator::new(NoopObserver);

    let outcome = coordinator.end(
        &item_id(0),
        Point::new(50.0, 50.0),
        &test_activity_sorted(),
        &registry,
        &ActivityEngine::default(),
    );
    assert_eq!(outcome, DropOutcome::Ignored);
}

#[derive(Default)]
struct Journal {
    events: Vec<String>,
}

impl DragObserver for Journal {
    fn on_drag_start(&mut self, item_id: &str, _start: Point) {
        self.events.push(format!("start {item_id}"));
    }

    fn on_drag_end(&mut self, item_id: &str, _drop: Point) {
        self.events.push(format!("end {item_id}"));
    }

    fn on_drag_cancel(&mut self, item_id: &str) {
        self.events.push(format!("cancel {item_id}"));
    }

    fn on_delete_requested(&mut self, request: &DeleteRequest) {
        self.events.push(format!("delete {}", request.item_id));
    }
}

#[test]
fn test_concurrent_drags_and_delete_requests() {
    let registry = column_board();
    let mut coordinator = DragCoordinator::new(Journal::default());

    assert!(coordinator.begin(&item_id(3), Point::new(10.0, 610.0)));
    assert!(coordinator.begin(&item_id(4), Point::new(20.0, 610.0)));
    assert!(!coordinator.begin(&item_id(3), Point::new(30.0, 610.0)));
    assert_eq!(coordinator.active_count(), 2);

    // A double-tap is reported even while the item is being dragged.
    let request = coordinator.request_delete(&item_id(4));
    assert_eq!(request.item_id, item_id(4));
    assert!(coordinator.is_dragging(&item_id(4)));

    assert!(coordinator.cancel(&item_id(4)));
    let outcome = coordinator.end(
        &item_id(3),
        Point::new(10.0, 10.0),
        &test_activity_sorted(),
        &registry,
        &ActivityEngine::default(),
    );
    assert!(matches!(outcome, DropOutcome::Dropped { .. }));
    assert_eq!(coordinator.active_count(), 0);

    let journal = coordinator.into_observer();
    assert_eq!(
        journal.events,
        vec![
            "start item-3",
            "start item-4",
            "delete item-4",
            "cancel item-4",
            "end item-3",
        ]
    );
}
