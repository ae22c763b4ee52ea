//! Exercise domain types.

use chrono::{DateTime, Utc};

use exercise_tracker_core::{Description, ExerciseDate, ExerciseDuration, ExerciseId, UserId};

/// A logged exercise (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    /// Opaque exercise ID.
    pub id: ExerciseId,
    /// User who logged this exercise.
    pub user_id: UserId,
    /// What was done.
    pub description: Description,
    /// How long it took, in minutes.
    pub duration: ExerciseDuration,
    /// Calendar day it was done on.
    pub date: ExerciseDate,
    /// When the record was stored.
    pub created_at: DateTime<Utc>,
}

/// A validated exercise ready to be written.
///
/// The date is already resolved: callers substitute today's date before
/// building one of these when the client omitted it.
#[derive(Debug, Clone)]
pub struct NewExercise {
    /// User the exercise belongs to. Must exist.
    pub user_id: UserId,
    /// What was done.
    pub description: Description,
    /// How long it took, in minutes.
    pub duration: ExerciseDuration,
    /// Calendar day it was done on.
    pub date: ExerciseDate,
}
