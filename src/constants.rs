//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the binary name, storage locations and zone identifiers.

/// The binary name of the application.
pub const APP_BINARY_NAME: &str = "sortboard";

/// Directory name used under the platform config/data directories.
pub const APP_DIR_NAME: &str = "SortBoard";

/// Number of colours in the category palette; `colorIndex` cycles modulo this.
pub const PALETTE_SIZE: usize = 6;

/// Maximum activity title length enforced by the input validation layer.
pub const MAX_TITLE_LEN: usize = 25;

/// File holding the serialized activity collection inside the data directory.
pub const STORAGE_FILE_NAME: &str = "activities.json";

/// Directory holding acquired images inside the data directory.
pub const IMAGES_DIR_NAME: &str = "images";

/// Zone identifier of the unsorted tray.
pub const TRAY_ZONE_ID: &str = "tray";

/// Prefix of category zone identifiers (`category-<id>`).
pub const CATEGORY_ZONE_PREFIX: &str = "category-";
