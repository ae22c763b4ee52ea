//! Exercise tracking service.
//!
//! Turns raw request input into validated domain values, enforces the
//! user-existence rules, and maps store errors into [`TrackerError`]. Handlers
//! call this service and never the stores directly.

mod error;

pub use error::TrackerError;

use std::sync::Arc;

use exercise_tracker_core::{
    Description, ExerciseDate, ExerciseDuration, LogFilter, UserId, Username,
};

use crate::db::{ExerciseStore, RepositoryError, UserStore};
use crate::models::{Exercise, NewExercise, User};

/// Raw fields of an exercise submission, as received.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExerciseInput<'a> {
    /// What was done. Required.
    pub description: Option<&'a str>,
    /// Minutes, as text. Required.
    pub duration: Option<&'a str>,
    /// Calendar date, as text. Blank or missing means today.
    pub date: Option<&'a str>,
}

/// Exercise tracking service.
///
/// Cheap to clone; stores are shared behind `Arc`.
#[derive(Clone)]
pub struct TrackerService {
    users: Arc<dyn UserStore>,
    exercises: Arc<dyn ExerciseStore>,
}

impl TrackerService {
    /// Create a new tracker service over the given stores.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, exercises: Arc<dyn ExerciseStore>) -> Self {
        Self { users, exercises }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidUsername` if the username is missing or blank.
    /// Returns `TrackerError::UsernameTaken` if the username is already registered.
    pub async fn register_user(&self, username: Option<&str>) -> Result<User, TrackerError> {
        let username = Username::parse(username.unwrap_or_default())?;

        let user = self.users.create(&username).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => TrackerError::UsernameTaken,
            other => TrackerError::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// All registered users, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Repository` if the store fails.
    pub async fn list_users(&self) -> Result<Vec<User>, TrackerError> {
        Ok(self.users.list().await?)
    }

    /// Resolve an opaque user ID.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UserNotFound` if the ID is malformed or unknown.
    pub async fn get_user(&self, id: &str) -> Result<User, TrackerError> {
        let id = UserId::parse(id).ok_or(TrackerError::UserNotFound)?;
        self.users
            .get_by_id(id)
            .await?
            .ok_or(TrackerError::UserNotFound)
    }

    // =========================================================================
    // Exercises
    // =========================================================================

    /// Log an exercise for an existing user.
    ///
    /// The user is resolved before any field is validated, so an unknown user
    /// is reported as such even when the submission is also malformed.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UserNotFound` if the user does not exist.
    /// Returns `TrackerError::InvalidDescription`, `InvalidDuration` or
    /// `InvalidDate` for malformed fields.
    pub async fn log_exercise(
        &self,
        user_id: &str,
        input: ExerciseInput<'_>,
    ) -> Result<(User, Exercise), TrackerError> {
        let user = self.get_user(user_id).await?;

        let new_exercise = NewExercise {
            user_id: user.id,
            description: Description::parse(input.description.unwrap_or_default())?,
            duration: ExerciseDuration::parse(input.duration.unwrap_or_default())?,
            date: ExerciseDate::parse_optional(input.date)?.unwrap_or_else(ExerciseDate::today),
        };

        let exercise = self
            .exercises
            .create(&new_exercise)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => TrackerError::UserNotFound,
                other => TrackerError::Repository(other),
            })?;

        tracing::info!(
            user_id = %user.id,
            exercise_id = %exercise.id,
            duration = exercise.duration.minutes(),
            date = %exercise.date,
            "Exercise logged"
        );
        Ok((user, exercise))
    }

    /// A user's exercise log, filtered by inclusive date range and limit.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UserNotFound` if the user does not exist.
    /// Returns `TrackerError::InvalidDate` if `from` or `to` is not a date.
    pub async fn exercise_log(
        &self,
        user_id: &str,
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<&str>,
    ) -> Result<(User, Vec<Exercise>), TrackerError> {
        let user = self.get_user(user_id).await?;
        let filter = LogFilter::from_query(from, to, limit)?;

        let log = self.exercises.query(user.id, &filter).await?;
        Ok((user, log))
    }

    /// Check that the backing store answers.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Repository` if the store is unreachable.
    pub async fn ping(&self) -> Result<(), TrackerError> {
        Ok(self.users.ping().await?)
    }
}
