//! SQLite implementation of VoteRepository
//!
//! The cast path is a single transaction: the existing-vote check, the
//! vote row write, and the score/last_interaction update commit together,
//! so the score always equals the sum of the vote rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use bubble_core::{BubbleId, DomainError, Fingerprint, RepoResult, Vote, VoteRepository, VoteValue};

use crate::mappers::datetime_to_millis;
use crate::models::VoteModel;

use super::error::map_db_error;

/// SQLite implementation of VoteRepository
#[derive(Clone)]
pub struct SqliteVoteRepository {
    pool: SqlitePool,
}

impl SqliteVoteRepository {
    /// Create a new SqliteVoteRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for SqliteVoteRepository {
    #[instrument(skip(self, voter))]
    async fn find(&self, bubble_id: BubbleId, voter: &Fingerprint) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            "SELECT bubble_id, fingerprint, vote FROM votes WHERE bubble_id = ? AND fingerprint = ?",
        )
        .bind(bubble_id.to_string())
        .bind(voter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self, voter))]
    async fn cast(
        &self,
        bubble_id: BubbleId,
        voter: &Fingerprint,
        value: VoteValue,
        now: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT vote FROM votes WHERE bubble_id = ? AND fingerprint = ?",
        )
        .bind(bubble_id.to_string())
        .bind(voter.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let delta = match existing {
            Some((current,)) if current == value.value() => {
                // Dropping the open transaction rolls it back
                return Err(DomainError::AlreadyVoted);
            }
            Some(_) => {
                // Direction change: overwrite the row, reverse old + apply new
                sqlx::query("UPDATE votes SET vote = ? WHERE bubble_id = ? AND fingerprint = ?")
                    .bind(value.value())
                    .bind(bubble_id.to_string())
                    .bind(voter.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                value.reversal_delta()
            }
            None => {
                sqlx::query("INSERT INTO votes (bubble_id, fingerprint, vote) VALUES (?, ?, ?)")
                    .bind(bubble_id.to_string())
                    .bind(voter.as_str())
                    .bind(value.value())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                value.value()
            }
        };

        let updated = sqlx::query(
            "UPDATE bubbles SET score = score + ?, last_interaction = ? WHERE id = ?",
        )
        .bind(delta)
        .bind(datetime_to_millis(now))
        .bind(bubble_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::BubbleNotFound(bubble_id));
        }

        let (score,): (i64,) = sqlx::query_as("SELECT score FROM bubbles WHERE id = ?")
            .bind(bubble_id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(score)
    }
}
