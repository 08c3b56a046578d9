//! # bubble-db
//!
//! Persistence layer implementing the repository traits from
//! `bubble-core` on SQLite via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management (a single connection, so store mutations
//!   serialize; `synchronous = FULL` flushes every write to disk)
//! - Idempotent schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ model mappers
//! - Repository implementations; read-modify-write paths (vote cast,
//!   suggestion toggle, expiry sweep) run inside one transaction so the
//!   derived score/count never drifts from the vote rows

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_memory_pool, create_pool, DatabaseConfig, SqlitePool};
pub use repositories::{
    SqliteBubbleRepository, SqliteSuggestionRepository, SqliteVoteRepository,
};
pub use schema::init_schema;
