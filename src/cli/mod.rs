//! CLI command handlers for SortBoard.
//!
//! Headless, scriptable access to activities, categories and item placement.
//! Every command opens the repository in the configured data directory,
//! applies one change and exits.

pub mod activity;
pub mod board;
pub mod category;
pub mod common;
pub mod config;
pub mod item;

// Re-export types used by main.rs and tests
pub use activity::ActivityArgs;
pub use board::BoardArgs;
pub use category::CategoryArgs;
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use item::ItemArgs;
