//! Service layer for business logic.
//!
//! This module contains the placement model, the activity engine and the
//! collaborators (storage, images) the repository coordinates.

pub mod activity;
pub mod images;
pub mod placement;
pub mod repository;
pub mod storage;

// Re-export commonly used types
pub use activity::{ActivityEngine, CategoryPolicy};
pub use images::{FsImageStore, ImageAcquisition, ImageKind, ImageStore};
pub use repository::ActivityRepository;
pub use storage::{ActivityStore, IntegrityWarning, JsonFileStore, MemoryStore};
