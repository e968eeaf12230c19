//! SortBoard Library
//!
//! Core of a picture-sorting board: activities hold categories and items,
//! items are dragged between an unsorted tray and category zones, and the
//! whole collection is persisted as JSON alongside copied picture files.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod sorting;
