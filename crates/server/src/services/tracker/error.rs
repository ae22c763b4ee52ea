//! Tracker error types.

use thiserror::Error;

use exercise_tracker_core::{DateError, DescriptionError, DurationError, UsernameError};

use crate::db::RepositoryError;

/// Errors that can occur during tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Username missing, blank or too long.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Description missing, blank or too long.
    #[error("invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    /// Duration missing or not a positive whole number.
    #[error("invalid duration: {0}")]
    InvalidDuration(#[from] DurationError),

    /// Date, `from` or `to` is not a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(#[from] DateError),

    /// Referenced user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// Username already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl TrackerError {
    /// Whether the error was caused by malformed client input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidUsername(_)
                | Self::InvalidDescription(_)
                | Self::InvalidDuration(_)
                | Self::InvalidDate(_)
        )
    }
}
