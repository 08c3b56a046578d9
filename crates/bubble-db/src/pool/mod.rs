//! Connection pool management

mod sqlite;

pub use sqlite::{create_memory_pool, create_pool, DatabaseConfig};
pub use sqlx::SqlitePool;
