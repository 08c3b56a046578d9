//! SQLite implementation of BubbleRepository

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use bubble_core::{Bubble, BubbleId, BubbleRepository, RepoResult, SweepStats};

use crate::mappers::datetime_to_millis;
use crate::models::BubbleModel;

use super::error::map_db_error;

const BUBBLE_COLUMNS: &str = "id, lat, lng, title, caption, media_url, media_type, score, \
     created_at, last_interaction, creator_fingerprint, bot_source, event_url, event_date, \
     event_end_date";

/// SQLite implementation of BubbleRepository
#[derive(Clone)]
pub struct SqliteBubbleRepository {
    pool: SqlitePool,
}

impl SqliteBubbleRepository {
    /// Create a new SqliteBubbleRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BubbleRepository for SqliteBubbleRepository {
    #[instrument(skip(self, bubble), fields(id = %bubble.id))]
    async fn create(&self, bubble: &Bubble) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO bubbles (id, lat, lng, title, caption, media_url, media_type, score,
                created_at, last_interaction, creator_fingerprint, bot_source, event_url,
                event_date, event_end_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(bubble.id.to_string())
        .bind(bubble.lat)
        .bind(bubble.lng)
        .bind(&bubble.title)
        .bind(&bubble.caption)
        .bind(&bubble.media_url)
        .bind(bubble.media_type.map(|mt| mt.as_str()))
        .bind(bubble.score)
        .bind(datetime_to_millis(bubble.created_at))
        .bind(datetime_to_millis(bubble.last_interaction))
        .bind(bubble.creator_fingerprint.as_str())
        .bind(&bubble.bot_source)
        .bind(&bubble.event_url)
        .bind(bubble.event_date.map(datetime_to_millis))
        .bind(bubble.event_end_date.map(datetime_to_millis))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BubbleId) -> RepoResult<Option<Bubble>> {
        let result = sqlx::query_as::<_, BubbleModel>(&format!(
            "SELECT {BUBBLE_COLUMNS} FROM bubbles WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Bubble::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_visible(
        &self,
        now: DateTime<Utc>,
        retention: Duration,
    ) -> RepoResult<Vec<Bubble>> {
        let cutoff = datetime_to_millis(now - retention);
        let now_ms = datetime_to_millis(now);

        let results = sqlx::query_as::<_, BubbleModel>(&format!(
            r"
            SELECT {BUBBLE_COLUMNS} FROM bubbles WHERE
            (bot_source IS NULL AND last_interaction > ?) OR
            (bot_source IS NOT NULL AND (event_end_date IS NULL OR event_end_date > ?))
            "
        ))
        .bind(cutoff)
        .bind(now_ms)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Bubble::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_user_bubbles(&self) -> RepoResult<Vec<Bubble>> {
        let results = sqlx::query_as::<_, BubbleModel>(&format!(
            "SELECT {BUBBLE_COLUMNS} FROM bubbles WHERE bot_source IS NULL"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Bubble::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn bot_duplicate_exists(
        &self,
        title: &str,
        source: &str,
        lat: f64,
        lng: f64,
        epsilon: f64,
    ) -> RepoResult<bool> {
        let existing: Option<(String,)> = sqlx::query_as(
            r"
            SELECT id FROM bubbles WHERE
                title = ? AND
                bot_source = ? AND
                ABS(lat - ?) < ? AND
                ABS(lng - ?) < ?
            LIMIT 1
            ",
        )
        .bind(title)
        .bind(source)
        .bind(lat)
        .bind(epsilon)
        .bind(lng)
        .bind(epsilon)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(existing.is_some())
    }

    #[instrument(skip(self))]
    async fn delete_expired(
        &self,
        now: DateTime<Utc>,
        retention: Duration,
    ) -> RepoResult<SweepStats> {
        let cutoff = datetime_to_millis(now - retention);
        let now_ms = datetime_to_millis(now);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let user_expired = sqlx::query(
            "DELETE FROM bubbles WHERE bot_source IS NULL AND last_interaction < ?",
        )
        .bind(cutoff)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let bot_expired = sqlx::query(
            r"
            DELETE FROM bubbles WHERE
                bot_source IS NOT NULL AND
                event_end_date IS NOT NULL AND
                event_end_date < ?
            ",
        )
        .bind(now_ms)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        // Orphaned votes go with their bubbles
        sqlx::query("DELETE FROM votes WHERE bubble_id NOT IN (SELECT id FROM bubbles)")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(SweepStats {
            user_expired,
            bot_expired,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: BubbleId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM bubbles WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query("DELETE FROM votes WHERE bubble_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
