//! User-facing notification settings.
//!
//! The surface the surrounding platform calls into: default config creation
//! on account creation, per-channel read/update, and the purge hook for
//! account deletion. Configs are created lazily; reading a channel a user
//! never touched materializes its default row.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crescendo_core::result::AppResult;
use crescendo_core::traits::{ChannelBindingRepository, NotificationConfigRepository};
use crescendo_entity::notification::{
    NotificationChannel, NotificationConfig, UpdateNotificationConfig,
};

use crate::context::RequestContext;

/// Manages per-channel notification configs.
pub struct NotificationSettingsService {
    configs: Arc<dyn NotificationConfigRepository>,
    bindings: Arc<dyn ChannelBindingRepository>,
}

impl NotificationSettingsService {
    /// Creates a new settings service.
    pub fn new(
        configs: Arc<dyn NotificationConfigRepository>,
        bindings: Arc<dyn ChannelBindingRepository>,
    ) -> Self {
        Self { configs, bindings }
    }

    /// Create the default email config for a freshly created user account.
    ///
    /// Idempotent: an existing config is returned untouched.
    pub async fn ensure_default_config(&self, user_id: Uuid) -> AppResult<NotificationConfig> {
        self.find_or_create(user_id, NotificationChannel::Email)
            .await
    }

    /// The acting user's config for one channel, created on first access.
    pub async fn config_for(
        &self,
        ctx: &RequestContext,
        channel: NotificationChannel,
    ) -> AppResult<NotificationConfig> {
        self.find_or_create(ctx.user_id, channel).await
    }

    /// The acting user's configs across all channels.
    pub async fn list_for(&self, ctx: &RequestContext) -> AppResult<Vec<NotificationConfig>> {
        let mut configs = Vec::with_capacity(NotificationChannel::ALL.len());
        for channel in NotificationChannel::ALL {
            configs.push(self.find_or_create(ctx.user_id, channel).await?);
        }
        Ok(configs)
    }

    /// Update the acting user's preferences for one channel.
    ///
    /// The channel itself is immutable; a different channel means a
    /// different config row.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        channel: NotificationChannel,
        changes: &UpdateNotificationConfig,
    ) -> AppResult<NotificationConfig> {
        let mut config = self.find_or_create(ctx.user_id, channel).await?;
        config.apply(changes);
        self.configs.update(&config).await?;
        Ok(config)
    }

    /// Remove every config and binding of a deleted user account.
    pub async fn purge_user(&self, user_id: Uuid) -> AppResult<()> {
        let bindings = self.bindings.delete_by_user(user_id).await?;
        let configs = self.configs.delete_by_user(user_id).await?;
        info!(%user_id, configs, bindings, "Purged notification settings");
        Ok(())
    }

    async fn find_or_create(
        &self,
        user_id: Uuid,
        channel: NotificationChannel,
    ) -> AppResult<NotificationConfig> {
        if let Some(existing) = self
            .configs
            .find_by_user_and_channel(user_id, channel)
            .await?
        {
            return Ok(existing);
        }

        let config = NotificationConfig::new_default(user_id, channel);
        self.configs.insert(&config).await?;
        Ok(config)
    }
}
