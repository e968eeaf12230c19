//! Drag gesture state machine.
//!
//! A [`DragSession`] follows one gesture: `Idle → Active → Committing → Idle`.
//! Pointer movement while active is cosmetic and never touches the model. On
//! release the drop point is resolved through the [`DropZoneRegistry`] and the
//! move is handed to the [`ActivityEngine`]; a release outside every zone, or a
//! cancelled gesture, leaves the activity unchanged.
//!
//! [`DragCoordinator`] tracks one session per item so that a second pick-up of
//! an item that is already being dragged is ignored, and forwards every step to
//! a [`DragObserver`] (the rendering layer).

use crate::models::Activity;
use crate::services::activity::ActivityEngine;
use crate::sorting::drop_zones::{DropZoneRegistry, ZoneId};
use std::collections::HashMap;
use tracing::debug;

/// A pointer position in the registry's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where a session is in its gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    /// An item is being dragged
    Active {
        /// Dragged item
        item_id: String,
        /// Pick-up position
        start: Point,
        /// Last reported position
        current: Point,
    },
    /// The drop is being applied
    Committing {
        /// Dropped item
        item_id: String,
        /// Release position
        drop: Point,
    },
}

/// Result of releasing a drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The point resolved to a zone; `activity` is the value to commit.
    Dropped {
        /// Zone under the release point
        zone: ZoneId,
        /// Activity after the move (equal to the input if nothing changed)
        activity: Activity,
    },
    /// The point matched no zone; the item stays where it was.
    Missed,
    /// No active drag existed for the item.
    Ignored,
}

impl DropOutcome {
    /// The activity to commit, if the drop resolved to a zone.
    #[must_use]
    pub fn into_activity(self) -> Option<Activity> {
        match self {
            Self::Dropped { activity, .. } => Some(activity),
            Self::Missed | Self::Ignored => None,
        }
    }
}

/// One drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    /// A session with no gesture in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// True while an item is being dragged.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active { .. })
    }

    /// The dragged item, if any.
    #[must_use]
    pub fn item_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Active { item_id, .. } | DragState::Committing { item_id, .. } => {
                Some(item_id.as_str())
            }
        }
    }

    /// Starts dragging `item_id`. Returns false unless the session was idle.
    pub fn pick_up(&mut self, item_id: &str, start: Point) -> bool {
        if !matches!(self.state, DragState::Idle) {
            return false;
        }
        self.state = DragState::Active {
            item_id: item_id.to_string(),
            start,
            current: start,
        };
        true
    }

    /// Records pointer movement. Returns false if no drag is active.
    pub fn update(&mut self, point: Point) -> bool {
        match &mut self.state {
            DragState::Active { current, .. } => {
                *current = point;
                true
            }
            _ => false,
        }
    }

    /// Abandons the gesture without consulting any zone.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = DragState::Idle;
        true
    }

    /// Releases the item at `drop` and resolves the target zone.
    pub fn release(
        &mut self,
        drop: Point,
        activity: &Activity,
        registry: &DropZoneRegistry,
        engine: &ActivityEngine,
    ) -> DropOutcome {
        let DragState::Active { item_id, .. } = std::mem::take(&mut self.state) else {
            return DropOutcome::Ignored;
        };
        self.state = DragState::Committing {
            item_id: item_id.clone(),
            drop,
        };

        let outcome = match registry.find_zone_at_point(drop.x, drop.y) {
            Some(zone) => {
                let activity = engine.move_item(activity, &item_id, &zone.location());
                debug!(item = %item_id, %zone, "drop resolved");
                DropOutcome::Dropped {
                    zone: zone.clone(),
                    activity,
                }
            }
            None => {
                debug!(item = %item_id, x = drop.x, y = drop.y, "drop outside every zone");
                DropOutcome::Missed
            }
        };

        self.state = DragState::Idle;
        outcome
    }
}

/// Intent to delete an item, raised by a double activation.
///
/// The owning screen confirms before calling a deletion operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    /// Item the user wants removed
    pub item_id: String,
}

/// Rendering collaborator notified of gesture progress. All hooks default to no-ops.
pub trait DragObserver {
    /// A drag started.
    fn on_drag_start(&mut self, _item_id: &str, _start: Point) {}
    /// The pointer moved during a drag.
    fn on_drag_update(&mut self, _item_id: &str, _point: Point) {}
    /// The item was released.
    fn on_drag_end(&mut self, _item_id: &str, _final_point: Point) {}
    /// The gesture was abandoned.
    fn on_drag_cancel(&mut self, _item_id: &str) {}
    /// A delete was requested for an item.
    fn on_delete_requested(&mut self, _request: &DeleteRequest) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DragObserver for NoopObserver {}

/// Runs drag sessions for any number of items, one per item.
#[derive(Debug, Default)]
pub struct DragCoordinator<O: DragObserver = NoopObserver> {
    sessions: HashMap<String, DragSession>,
    observer: O,
}

impl<O: DragObserver> DragCoordinator<O> {
    /// Coordinator reporting to `observer`.
    pub fn new(observer: O) -> Self {
        Self {
            sessions: HashMap::new(),
            observer,
        }
    }

    /// The rendering collaborator.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Consumes the coordinator, returning the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// True if `item_id` is currently being dragged.
    #[must_use]
    pub fn is_dragging(&self, item_id: &str) -> bool {
        self.sessions.get(item_id).is_some_and(DragSession::is_active)
    }

    /// Number of drags in progress.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.values().filter(|s| s.is_active()).count()
    }

    /// Picks up `item_id`. A second pick-up of the same item is ignored.
    pub fn begin(&mut self, item_id: &str, start: Point) -> bool {
        if self.is_dragging(item_id) {
            debug!(item = item_id, "ignoring duplicate drag");
            return false;
        }
        let mut session = DragSession::new();
        session.pick_up(item_id, start);
        self.sessions.insert(item_id.to_string(), session);
        self.observer.on_drag_start(item_id, start);
        true
    }

    /// Forwards pointer movement for `item_id`.
    pub fn update(&mut self, item_id: &str, point: Point) -> bool {
        let moved = self
            .sessions
            .get_mut(item_id)
            .is_some_and(|s| s.update(point));
        if moved {
            self.observer.on_drag_update(item_id, point);
        }
        moved
    }

    /// Ends the drag of `item_id` at `final_point`.
    pub fn end(
        &mut self,
        item_id: &str,
        final_point: Point,
        activity: &Activity,
        registry: &DropZoneRegistry,
        engine: &ActivityEngine,
    ) -> DropOutcome {
        let Some(mut session) = self.sessions.remove(item_id) else {
            return DropOutcome::Ignored;
        };
        let outcome = session.release(final_point, activity, registry, engine);
        self.observer.on_drag_end(item_id, final_point);
        outcome
    }

    /// Cancels the drag of `item_id` without resolving any zone.
    pub fn cancel(&mut self, item_id: &str) -> bool {
        let Some(mut session) = self.sessions.remove(item_id) else {
            return false;
        };
        let cancelled = session.cancel();
        if cancelled {
            self.observer.on_drag_cancel(item_id);
        }
        cancelled
    }

    /// Signals that the user double-activated `item_id`.
    ///
    /// Independent of any drag in progress.
    pub fn request_delete(&mut self, item_id: &str) -> DeleteRequest {
        let request = DeleteRequest {
            item_id: item_id.to_string(),
        };
        self.observer.on_delete_requested(&request);
        request
    }
}
