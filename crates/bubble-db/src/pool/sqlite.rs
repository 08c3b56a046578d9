//! SQLite connection pool management
//!
//! The pool is capped at a single connection: every store mutation runs to
//! completion on that connection, which is what serializes request-driven
//! writes against the periodic sweep and importer. `synchronous = FULL`
//! makes each committed write hit the disk before the call returns.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

/// Database configuration for the connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file; `:memory:` for an in-memory store
    pub path: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::from("bubbles.db"),
            max_connections: 1,
        }
    }
}

impl DatabaseConfig {
    /// Create config for a database file at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Create a new SQLite connection pool, creating the database file if needed
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", config.path))?
        .create_if_missing(true)
        .synchronous(SqliteSynchronous::Full)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Create an in-memory pool (used by tests)
///
/// The single pooled connection is kept alive for the pool's lifetime,
/// which is what keeps the in-memory database alive.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}
