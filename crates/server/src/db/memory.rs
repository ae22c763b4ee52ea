//! In-memory store for tests.
//!
//! Implements both [`UserStore`] and [`ExerciseStore`] over vectors behind a
//! `tokio::sync::RwLock`, with the same observable behavior as the
//! `PostgreSQL` repositories: unique usernames, insertion-order listings, and
//! a referential check on exercise writes. Only compiled for tests or with the
//! `test-support` feature; the server never falls back to it.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use exercise_tracker_core::{ExerciseId, LogFilter, UserId, Username};

use super::{ExerciseStore, RepositoryError, UserStore};
use crate::models::{Exercise, NewExercise, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    exercises: Vec<Exercise>,
}

/// Users and exercises held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing the backing database: while offline every call fails
    /// with a pool timeout.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), RepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, username: &Username) -> Result<User, RepositoryError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| &u.username == username) {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }

        let user = User {
            id: UserId::generate(),
            username: username.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        self.check_online()?;
        Ok(self.tables.read().await.users.clone())
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_online()
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn create(&self, exercise: &NewExercise) -> Result<Exercise, RepositoryError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == exercise.user_id) {
            return Err(RepositoryError::NotFound);
        }

        let stored = Exercise {
            id: ExerciseId::generate(),
            user_id: exercise.user_id,
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: exercise.date,
            created_at: Utc::now(),
        };
        tables.exercises.push(stored.clone());
        Ok(stored)
    }

    async fn query(
        &self,
        user_id: UserId,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, RepositoryError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let owned = tables
            .exercises
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned();
        Ok(filter.apply(owned, |e| e.date))
    }
}
