//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TRACKER_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `TRACKER_HOST` - Bind address (default: 127.0.0.1)
//! - `TRACKER_PORT` - Listen port (falls back to `PORT`, default: 3000)
//! - `TRACKER_PUBLIC_DIR` - Static asset directory served at `/public` (default: public)
//! - `TRACKER_INDEX_PAGE` - Landing page served at `/` (default: views/index.html)
//! - `TRACKER_DB_MAX_CONNECTIONS` - Connection pool size (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory of static assets
    pub public_dir: PathBuf,
    /// HTML landing page
    pub index_page: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl TrackerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TRACKER_DATABASE_URL")?;
        let db_max_connections = parse_env("TRACKER_DB_MAX_CONNECTIONS", "10")?;
        let host = parse_env("TRACKER_HOST", "127.0.0.1")?;
        let port = select_port(
            get_optional_env("TRACKER_PORT").as_deref(),
            get_optional_env("PORT").as_deref(),
        )?;

        Ok(Self {
            database_url,
            db_max_connections,
            host,
            port,
            public_dir: get_env_or_default("TRACKER_PUBLIC_DIR", "public").into(),
            index_page: get_env_or_default("TRACKER_INDEX_PAGE", "views/index.html").into(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Some(value) = get_optional_env(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Some(value) = get_optional_env("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Pick the listen port: `TRACKER_PORT`, then the platform's `PORT`, then 3000.
fn select_port(tracker_port: Option<&str>, port: Option<&str>) -> Result<u16, ConfigError> {
    match (tracker_port, port) {
        (Some(raw), _) => parse_value("TRACKER_PORT", raw),
        (None, Some(raw)) => parse_value("PORT", raw),
        (None, None) => Ok(DEFAULT_PORT),
    }
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}
