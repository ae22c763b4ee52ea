//! Exercise repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use exercise_tracker_core::{
    Description, ExerciseDate, ExerciseDuration, ExerciseId, LogFilter, UserId,
};

use super::{ExerciseStore, RepositoryError, map_insert_error};
use crate::models::{Exercise, NewExercise};

/// Row shape of `tracker.exercise`.
#[derive(Debug, sqlx::FromRow)]
struct ExerciseRow {
    id: ExerciseId,
    user_id: UserId,
    description: Description,
    duration: ExerciseDuration,
    date: ExerciseDate,
    created_at: DateTime<Utc>,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            description: row.description,
            duration: row.duration,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

/// Repository for exercise database operations.
#[derive(Debug, Clone)]
pub struct ExerciseRepository {
    pool: PgPool,
}

impl ExerciseRepository {
    /// Create a new exercise repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Bind value for `LIMIT`. `NULL` means no limit.
fn limit_param(filter: &LogFilter) -> Option<i64> {
    filter
        .limit()
        .map(|limit| i64::try_from(limit).unwrap_or(i64::MAX))
}

#[async_trait]
impl ExerciseStore for ExerciseRepository {
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn create(&self, exercise: &NewExercise) -> Result<Exercise, RepositoryError> {
        let row = sqlx::query_as::<_, ExerciseRow>(
            r"
            INSERT INTO tracker.exercise (id, user_id, description, duration, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, description, duration, date, created_at
            ",
        )
        .bind(ExerciseId::generate())
        .bind(exercise.user_id)
        .bind(&exercise.description)
        .bind(exercise.duration)
        .bind(exercise.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "exercise already exists"))?;

        Ok(row.into())
    }

    async fn query(
        &self,
        user_id: UserId,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExerciseRow>(
            r"
            SELECT id, user_id, description, duration, date, created_at
            FROM tracker.exercise
            WHERE
                user_id = $1
                AND ($2::date IS NULL OR date >= $2)
                AND ($3::date IS NULL OR date <= $3)
            ORDER BY seq ASC
            LIMIT $4
            ",
        )
        .bind(user_id)
        .bind(filter.from)
        .bind(filter.to)
        .bind(limit_param(filter))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Exercise::from).collect())
    }
}
