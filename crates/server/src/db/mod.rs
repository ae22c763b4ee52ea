//! Persistence for users and exercises.
//!
//! # Database: `PostgreSQL`, schema `tracker`
//!
//! ## Tables
//!
//! - `user` - Registered users, unique `username`
//! - `exercise` - Logged exercises, `user_id` references `user.id`
//!
//! Both tables carry a `seq` identity column; listings are returned in `seq`
//! order, which is insertion order.
//!
//! # Store seams
//!
//! Handlers never touch SQL directly. They go through the [`UserStore`] and
//! [`ExerciseStore`] traits, implemented here by [`UserRepository`] and
//! [`ExerciseRepository`] over a `PgPool`. Tests swap in the in-memory
//! [`memory::MemoryStore`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p exercise-tracker-cli -- migrate
//! ```

pub mod exercises;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use exercise_tracker_core::{LogFilter, UserId, Username};

pub use exercises::ExerciseRepository;
pub use users::UserRepository;

use crate::models::{Exercise, NewExercise, User};

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested or referenced entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage for registered users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user with a freshly generated ID.
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    async fn create(&self, username: &Username) -> Result<User, RepositoryError>;

    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Look up a single user.
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Storage for logged exercises.
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Insert a new exercise with a freshly generated ID.
    ///
    /// Returns `RepositoryError::NotFound` if the referenced user does not
    /// exist at write time.
    async fn create(&self, exercise: &NewExercise) -> Result<Exercise, RepositoryError>;

    /// A user's exercises matching `filter`, in insertion order, truncated to
    /// the filter's limit.
    async fn query(
        &self,
        user_id: UserId,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool connects lazily: an unreachable database does not prevent the
/// server from starting, it surfaces as a failed readiness check and as
/// errors on store calls.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())
}

/// Map an insert error, turning constraint violations into typed errors.
fn map_insert_error(e: sqlx::Error, conflict_message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(conflict_message.to_owned());
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::NotFound;
        }
    }
    RepositoryError::Database(e)
}
