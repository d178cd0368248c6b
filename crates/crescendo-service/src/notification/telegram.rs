//! Telegram notification sender.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crescendo_core::result::AppResult;
use crescendo_core::traits::{ChannelBindingRepository, ChatTransport, NotificationConfigRepository};
use crescendo_entity::notification::NotificationChannel;
use crescendo_entity::release::Release;
use crescendo_entity::user::User;

use super::sender::{release_line, NotificationSender};

/// Formats chat texts and sends them to the user's bound Telegram chat.
///
/// A user without a completed binding is silently skipped; enabling the
/// Telegram channel before finishing the handshake is a normal intermediate
/// state, not an error.
pub struct TelegramNotificationSender {
    chat: Arc<dyn ChatTransport>,
    configs: Arc<dyn NotificationConfigRepository>,
    bindings: Arc<dyn ChannelBindingRepository>,
}

impl TelegramNotificationSender {
    /// Creates a new Telegram sender.
    pub fn new(
        chat: Arc<dyn ChatTransport>,
        configs: Arc<dyn NotificationConfigRepository>,
        bindings: Arc<dyn ChannelBindingRepository>,
    ) -> Self {
        Self {
            chat,
            configs,
            bindings,
        }
    }

    /// The chat id bound to the user's Telegram config, if the handshake
    /// completed.
    async fn bound_chat_id(&self, user: &User) -> AppResult<Option<i64>> {
        let Some(config) = self
            .configs
            .find_by_user_and_channel(user.id, NotificationChannel::Telegram)
            .await?
        else {
            return Ok(None);
        };

        Ok(self
            .bindings
            .find_by_config(config.id)
            .await?
            .and_then(|binding| binding.chat_id))
    }

    async fn send_text(&self, user: &User, text: String) -> AppResult<()> {
        match self.bound_chat_id(user).await? {
            Some(chat_id) => self.chat.send_message(chat_id, &text).await,
            None => {
                debug!(user_id = %user.id, "No bound chat, skipping Telegram notification");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl NotificationSender for TelegramNotificationSender {
    async fn send_frequency_message(
        &self,
        user: &User,
        upcoming: &[Release],
        recent: &[Release],
    ) -> AppResult<()> {
        let mut text = String::from("Your release overview\n");
        if !upcoming.is_empty() {
            text.push_str("\nUpcoming:\n");
            for release in upcoming {
                text.push_str(&format!("{}\n", release_line(release)));
            }
        }
        if !recent.is_empty() {
            text.push_str("\nRecently released:\n");
            for release in recent {
                text.push_str(&format!("{}\n", release_line(release)));
            }
        }
        self.send_text(user, text).await
    }

    async fn send_release_date_message(&self, user: &User, todays: &[Release]) -> AppResult<()> {
        let mut text = String::from("Out today:\n");
        for release in todays {
            text.push_str(&format!("{}\n", release_line(release)));
        }
        self.send_text(user, text).await
    }

    async fn send_announcement_date_message(
        &self,
        user: &User,
        todays: &[Release],
    ) -> AppResult<()> {
        let mut text = String::from("Announced today:\n");
        for release in todays {
            text.push_str(&format!("{}\n", release_line(release)));
        }
        self.send_text(user, text).await
    }
}
