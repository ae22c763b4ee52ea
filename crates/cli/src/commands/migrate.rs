//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! tracker-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `TRACKER_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded at compile
//! time:
//! ```text
//! migrations/
//! ├── 20260301000001_create_users.sql
//! └── 20260301000002_create_exercises.sql
//! ```

use tracing::info;

use super::{CommandError, connect_pool};

/// Run tracker database migrations.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect_pool()?;

    info!("Running tracker migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Tracker migrations complete!");
    Ok(())
}
