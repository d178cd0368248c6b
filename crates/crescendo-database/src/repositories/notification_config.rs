//! Notification config repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crescendo_core::error::{AppError, ErrorKind};
use crescendo_core::result::AppResult;
use crescendo_core::traits::NotificationConfigRepository;
use crescendo_entity::notification::{NotificationChannel, NotificationConfig};

/// Repository for notification config rows.
#[derive(Debug, Clone)]
pub struct PgNotificationConfigRepository {
    pool: PgPool,
}

impl PgNotificationConfigRepository {
    /// Create a new notification config repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationConfigRepository for PgNotificationConfigRepository {
    async fn find_all_active(&self) -> AppResult<Vec<NotificationConfig>> {
        sqlx::query_as::<_, NotificationConfig>(
            "SELECT c.* FROM notification_configs c \
             JOIN users u ON u.id = c.user_id \
             WHERE u.enabled ORDER BY c.user_id, c.channel",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list active configs", e))
    }

    async fn find_by_user_and_channel(
        &self,
        user_id: Uuid,
        channel: NotificationChannel,
    ) -> AppResult<Option<NotificationConfig>> {
        sqlx::query_as::<_, NotificationConfig>(
            "SELECT * FROM notification_configs WHERE user_id = $1 AND channel = $2",
        )
        .bind(user_id)
        .bind(channel)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find config", e))
    }

    async fn insert(&self, config: &NotificationConfig) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO notification_configs \
             (id, user_id, channel, notify, frequency_weeks, notification_at_release_date, \
              notification_at_announcement_date, notify_reissues, last_notification_date, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(config.id)
        .bind(config.user_id)
        .bind(config.channel)
        .bind(config.notify)
        .bind(config.frequency_weeks)
        .bind(config.notification_at_release_date)
        .bind(config.notification_at_announcement_date)
        .bind(config.notify_reissues)
        .bind(config.last_notification_date)
        .bind(config.created_at)
        .bind(config.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert config", e))?;
        Ok(())
    }

    async fn update(&self, config: &NotificationConfig) -> AppResult<()> {
        sqlx::query(
            "UPDATE notification_configs SET \
             notify = $2, frequency_weeks = $3, notification_at_release_date = $4, \
             notification_at_announcement_date = $5, notify_reissues = $6, updated_at = $7 \
             WHERE id = $1",
        )
        .bind(config.id)
        .bind(config.notify)
        .bind(config.frequency_weeks)
        .bind(config.notification_at_release_date)
        .bind(config.notification_at_announcement_date)
        .bind(config.notify_reissues)
        .bind(config.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update config", e))?;
        Ok(())
    }

    async fn advance_last_notification(&self, config_id: Uuid, date: NaiveDate) -> AppResult<()> {
        sqlx::query(
            "UPDATE notification_configs SET last_notification_date = $2, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(config_id)
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to advance notification date", e)
        })?;
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notification_configs WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete configs", e)
            })?;
        Ok(result.rows_affected())
    }
}
