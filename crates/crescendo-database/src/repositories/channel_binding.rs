//! Channel binding repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crescendo_core::error::{AppError, ErrorKind};
use crescendo_core::result::AppResult;
use crescendo_core::traits::ChannelBindingRepository;
use crescendo_entity::notification::ChannelBinding;

/// Repository for Telegram channel binding rows.
#[derive(Debug, Clone)]
pub struct PgChannelBindingRepository {
    pool: PgPool,
}

impl PgChannelBindingRepository {
    /// Create a new channel binding repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelBindingRepository for PgChannelBindingRepository {
    async fn find_by_config(&self, config_id: Uuid) -> AppResult<Option<ChannelBinding>> {
        sqlx::query_as::<_, ChannelBinding>(
            "SELECT * FROM channel_bindings WHERE notification_config_id = $1",
        )
        .bind(config_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find binding", e))
    }

    async fn registration_id_in_use(&self, code: i32) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM channel_bindings WHERE registration_id = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check registration id", e)
        })
    }

    async fn upsert(&self, binding: &ChannelBinding) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO channel_bindings \
             (id, notification_config_id, registration_id, chat_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (notification_config_id) DO UPDATE SET \
             registration_id = $3, chat_id = $4, updated_at = $6",
        )
        .bind(binding.id)
        .bind(binding.notification_config_id)
        .bind(binding.registration_id)
        .bind(binding.chat_id)
        .bind(binding.created_at)
        .bind(binding.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert binding", e))?;
        Ok(())
    }

    async fn claim_registration(
        &self,
        code: i32,
        chat_id: i64,
    ) -> AppResult<Option<ChannelBinding>> {
        // Single-statement compare-and-bind; of two racing completions at
        // most one matches the WHERE clause.
        sqlx::query_as::<_, ChannelBinding>(
            "UPDATE channel_bindings \
             SET chat_id = $2, registration_id = NULL, updated_at = NOW() \
             WHERE registration_id = $1 RETURNING *",
        )
        .bind(code)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim registration", e))
    }

    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM channel_bindings WHERE notification_config_id IN \
             (SELECT id FROM notification_configs WHERE user_id = $1)",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete bindings", e))?;
        Ok(result.rows_affected())
    }
}
