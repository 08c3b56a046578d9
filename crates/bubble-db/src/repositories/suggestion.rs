//! SQLite implementation of SuggestionRepository
//!
//! The toggle path mirrors the vote cast: existence check, row flip, and
//! count update commit in one transaction.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use bubble_core::{
    DomainError, Fingerprint, RepoResult, Suggestion, SuggestionId, SuggestionRepository,
    ToggleOutcome,
};

use crate::mappers::datetime_to_millis;
use crate::models::SuggestionModel;

use super::error::map_db_error;

const SUGGESTION_COLUMNS: &str =
    "id, title, description, votes, created_at, creator_fingerprint";

/// SQLite implementation of SuggestionRepository
#[derive(Clone)]
pub struct SqliteSuggestionRepository {
    pool: SqlitePool,
}

impl SqliteSuggestionRepository {
    /// Create a new SqliteSuggestionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuggestionRepository for SqliteSuggestionRepository {
    #[instrument(skip(self, suggestion), fields(id = %suggestion.id))]
    async fn create(&self, suggestion: &Suggestion) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO suggestions (id, title, description, votes, created_at, creator_fingerprint)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(suggestion.id.to_string())
        .bind(&suggestion.title)
        .bind(&suggestion.description)
        .bind(suggestion.votes)
        .bind(datetime_to_millis(suggestion.created_at))
        .bind(suggestion.creator_fingerprint.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: SuggestionId) -> RepoResult<Option<Suggestion>> {
        let result = sqlx::query_as::<_, SuggestionModel>(&format!(
            "SELECT {SUGGESTION_COLUMNS} FROM suggestions WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Suggestion::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_ranked(&self) -> RepoResult<Vec<Suggestion>> {
        let results = sqlx::query_as::<_, SuggestionModel>(&format!(
            "SELECT {SUGGESTION_COLUMNS} FROM suggestions ORDER BY votes DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Suggestion::try_from).collect()
    }

    #[instrument(skip(self, voter))]
    async fn toggle_vote(
        &self,
        id: SuggestionId,
        voter: &Fingerprint,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM suggestions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if exists.is_none() {
            return Err(DomainError::SuggestionNotFound(id));
        }

        let existing: Option<(String,)> = sqlx::query_as(
            "SELECT suggestion_id FROM suggestion_votes WHERE suggestion_id = ? AND fingerprint = ?",
        )
        .bind(id.to_string())
        .bind(voter.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let voted = if existing.is_some() {
            sqlx::query(
                "DELETE FROM suggestion_votes WHERE suggestion_id = ? AND fingerprint = ?",
            )
            .bind(id.to_string())
            .bind(voter.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            sqlx::query("UPDATE suggestions SET votes = votes - 1 WHERE id = ?")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            false
        } else {
            sqlx::query("INSERT INTO suggestion_votes (suggestion_id, fingerprint) VALUES (?, ?)")
                .bind(id.to_string())
                .bind(voter.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

            sqlx::query("UPDATE suggestions SET votes = votes + 1 WHERE id = ?")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            true
        };

        let (votes,): (i64,) = sqlx::query_as("SELECT votes FROM suggestions WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ToggleOutcome { votes, voted })
    }

    #[instrument(skip(self, voter))]
    async fn has_voted(&self, id: SuggestionId, voter: &Fingerprint) -> RepoResult<bool> {
        let existing: Option<(String,)> = sqlx::query_as(
            "SELECT suggestion_id FROM suggestion_votes WHERE suggestion_id = ? AND fingerprint = ?",
        )
        .bind(id.to_string())
        .bind(voter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(existing.is_some())
    }
}
