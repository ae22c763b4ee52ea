//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{ExerciseRepository, ExerciseStore, UserRepository, UserStore};
use crate::services::TrackerService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tracker: TrackerService,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self::from_stores(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(ExerciseRepository::new(pool)),
        )
    }

    /// Create application state over arbitrary stores.
    #[must_use]
    pub fn from_stores(users: Arc<dyn UserStore>, exercises: Arc<dyn ExerciseStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                tracker: TrackerService::new(users, exercises),
            }),
        }
    }

    /// Application state over a fresh in-memory store.
    ///
    /// The store is returned alongside so tests can inspect it or take it
    /// offline.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn in_memory() -> (Self, Arc<crate::db::memory::MemoryStore>) {
        let store = Arc::new(crate::db::memory::MemoryStore::new());
        (Self::from_stores(store.clone(), store.clone()), store)
    }

    /// Get a reference to the tracker service.
    #[must_use]
    pub fn tracker(&self) -> &TrackerService {
        &self.inner.tracker
    }
}
