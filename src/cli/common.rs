//! Shared plumbing for CLI commands: errors, exit codes and repository access.

use crate::config::Config;
use crate::error::SortError;
use crate::models::{Activity, Location};
use crate::services::{ActivityEngine, ActivityRepository, FsImageStore, JsonFileStore};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input
    Validation = 1,
    /// Storage or filesystem failure
    Io = 2,
    /// Referenced activity, category or item does not exist
    NotFound = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// A failed CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid user input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// Storage or filesystem failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Unknown id on the command line.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::NotFound,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<SortError> for CliError {
    fn from(err: SortError) -> Self {
        match err {
            SortError::Validation(message) => Self::validation(message),
            other => Self::io(other.to_string()),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Repository type backing the CLI.
pub type Repository = ActivityRepository<JsonFileStore, FsImageStore>;

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Loaded configuration
    pub config: Config,
    /// Directory holding activities and images
    pub data_dir: PathBuf,
    /// Config file given with `--config`, if any
    pub config_path: Option<PathBuf>,
}

impl CliContext {
    /// Opens the repository in the data directory.
    pub fn open_repository(&self) -> Repository {
        ActivityRepository::open(
            JsonFileStore::in_dir(&self.data_dir),
            FsImageStore::in_dir(&self.data_dir),
            ActivityEngine::new(self.config.sorting.category_policy()),
        )
    }

    /// Path of the config file in use.
    pub fn config_file(&self) -> CliResult<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path().map_err(|e| CliError::io(format!("{e:#}"))),
        }
    }

    /// Reads the config file as stored, without command-line overrides.
    pub fn load_config_file(&self) -> CliResult<Config> {
        match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))
    }

    /// Writes `config` back to the file it was read from.
    pub fn save_config_file(&self, config: &Config) -> CliResult<()> {
        match &self.config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
        .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))
    }
}

/// Looks up an activity, failing with [`ExitCode::NotFound`].
pub fn require_activity<'a>(repo: &'a Repository, activity_id: &str) -> CliResult<&'a Activity> {
    repo.activity(activity_id)
        .ok_or_else(|| CliError::not_found(format!("Activity '{activity_id}' not found")))
}

/// Fails with [`ExitCode::NotFound`] unless the category exists.
pub fn require_category(activity: &Activity, category_id: &str) -> CliResult<()> {
    if activity.category(category_id).is_none() {
        return Err(CliError::not_found(format!(
            "Category '{category_id}' not found in activity '{}'",
            activity.id
        )));
    }
    Ok(())
}

/// Fails with [`ExitCode::NotFound`] unless the item exists.
pub fn require_item(activity: &Activity, item_id: &str) -> CliResult<()> {
    if activity.item(item_id).is_none() {
        return Err(CliError::not_found(format!(
            "Item '{item_id}' not found in activity '{}'",
            activity.id
        )));
    }
    Ok(())
}

/// Human-readable name of a location within `activity`.
pub fn describe_location(activity: &Activity, location: &Location) -> String {
    match location {
        Location::Unsorted => "tray".to_string(),
        Location::InCategory(id) => activity
            .category(id)
            .map_or_else(|| id.clone(), |c| c.title.clone()),
    }
}

/// Prints `value` as a single line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
