//! User domain types.

use chrono::{DateTime, Utc};

use exercise_tracker_core::{UserId, Username};

/// A registered user (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque user ID.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
