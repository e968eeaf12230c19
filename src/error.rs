//! Error taxonomy for the placement core and its collaborators.
//!
//! Unknown item or category ids are not errors: every mutation treats them as a
//! silent no-op so that stale UI callbacks cannot fail. Integrity problems found
//! while loading are reported as [`IntegrityWarning`](crate::services::storage::IntegrityWarning)
//! values, never as `Err`.

use std::error::Error as StdError;

/// Errors surfaced by the core and the storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// Malformed input to a creation or rename operation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The storage collaborator failed to write. In-memory state is not rolled back.
    #[error("failed to persist activities: {message}")]
    Persistence {
        /// What was being written when the failure happened.
        message: String,
        /// Underlying I/O or serialization error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The image collaborator could not store a picked image.
    #[error("failed to acquire image: {message}")]
    Image {
        /// Which image was being acquired.
        message: String,
        /// Underlying error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl SortError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a persistence error wrapping `source`.
    pub fn persistence(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Creates an image acquisition error wrapping `source`.
    pub fn image(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Image {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Returns true for [`SortError::Validation`].
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true for [`SortError::Persistence`].
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

/// Result alias used across the library.
pub type SortResult<T> = Result<T, SortError>;
