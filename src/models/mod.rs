//! Data models for activities, categories and items.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod activity;
pub mod category;
pub mod color_palette;
pub mod item;
pub mod rgb;

// Re-export all model types
pub use activity::{Activity, ActivityCollection, Orientation};
pub use category::Category;
pub use item::{ImageRef, Item, Location};
pub use rgb::RgbColor;
