//! Drag-and-drop sorting: drop zone hit-testing and the drag gesture state machine.

pub mod drag;
pub mod drop_zones;

pub use drag::{
    DeleteRequest, DragCoordinator, DragObserver, DragSession, DragState, DropOutcome,
    NoopObserver, Point,
};
pub use drop_zones::{DropZoneRegistry, Rect, ZoneId};
