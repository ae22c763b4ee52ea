//! User repository for database operations.
//!
//! Queries are built at runtime and decoded through [`sqlx::FromRow`] rows, so
//! the crate builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use exercise_tracker_core::{UserId, Username};

use super::{RepositoryError, UserStore, map_insert_error};
use crate::models::User;

/// Row shape of `tracker.user`.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: Username,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn create(&self, username: &Username) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO tracker.user (id, username)
            VALUES ($1, $2)
            RETURNING id, username, created_at
            ",
        )
        .bind(UserId::generate())
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "username already exists"))?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, created_at
            FROM tracker.user
            ORDER BY seq ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, created_at
            FROM tracker.user
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
