//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod users;

use exercise_tracker_server::config::{ConfigError, TrackerConfig};
use exercise_tracker_server::db;
use exercise_tracker_server::services::TrackerError;
use exercise_tracker_server::state::AppState;
use sqlx::PgPool;

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load configuration and open a pool on the configured database.
fn connect_pool() -> Result<PgPool, CommandError> {
    let config = TrackerConfig::from_env()?;
    tracing::info!("Connecting to tracker database...");
    let pool = db::create_pool(&config.database_url, config.db_max_connections)?;
    Ok(pool)
}

/// State over the configured database, for commands that go through the
/// tracker service.
fn connect_state() -> Result<AppState, CommandError> {
    Ok(AppState::from_pool(connect_pool()?))
}
