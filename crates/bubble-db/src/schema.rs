//! Schema bootstrap
//!
//! Creates the tables and indexes idempotently at startup. Timestamps are
//! stored as integer milliseconds since the Unix epoch.

use sqlx::SqlitePool;

const CREATE_BUBBLES: &str = r"
    CREATE TABLE IF NOT EXISTS bubbles (
        id TEXT PRIMARY KEY,
        lat REAL NOT NULL,
        lng REAL NOT NULL,
        title TEXT NOT NULL,
        caption TEXT,
        media_url TEXT,
        media_type TEXT,
        score INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL,
        last_interaction INTEGER NOT NULL,
        creator_fingerprint TEXT NOT NULL,
        bot_source TEXT DEFAULT NULL,
        event_url TEXT DEFAULT NULL,
        event_date INTEGER DEFAULT NULL,
        event_end_date INTEGER DEFAULT NULL
    )
";

const CREATE_VOTES: &str = r"
    CREATE TABLE IF NOT EXISTS votes (
        bubble_id TEXT NOT NULL,
        fingerprint TEXT NOT NULL,
        vote INTEGER NOT NULL,
        PRIMARY KEY (bubble_id, fingerprint)
    )
";

const CREATE_SUGGESTIONS: &str = r"
    CREATE TABLE IF NOT EXISTS suggestions (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        votes INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL,
        creator_fingerprint TEXT NOT NULL
    )
";

const CREATE_SUGGESTION_VOTES: &str = r"
    CREATE TABLE IF NOT EXISTS suggestion_votes (
        suggestion_id TEXT NOT NULL,
        fingerprint TEXT NOT NULL,
        PRIMARY KEY (suggestion_id, fingerprint)
    )
";

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_bubbles_location ON bubbles(lat, lng)",
    "CREATE INDEX IF NOT EXISTS idx_bubbles_created ON bubbles(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_bubbles_interaction ON bubbles(last_interaction)",
];

/// Create all tables and indexes if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [
        CREATE_BUBBLES,
        CREATE_VOTES,
        CREATE_SUGGESTIONS,
        CREATE_SUGGESTION_VOTES,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
