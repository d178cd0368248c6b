//! Daily announcement-date notification trigger.

use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use crescendo_core::error::AppError;
use crescendo_core::result::AppResult;
use crescendo_core::traits::{NotificationConfigRepository, UserRepository};
use crescendo_entity::notification::NotificationConfig;
use crescendo_service::notification::ChannelDispatcher;
use crescendo_service::release::ReleaseCollector;

use crate::trigger::{TriggerJob, TriggerOutcome};

/// Notifies opted-in users about releases announced today.
///
/// Runs independently of the release-date trigger and is equally stateless:
/// nothing is written, a same-day re-run recomputes and re-sends.
pub struct AnnouncementDateTriggerJob {
    configs: Arc<dyn NotificationConfigRepository>,
    users: Arc<dyn UserRepository>,
    collector: Arc<ReleaseCollector>,
    dispatcher: Arc<ChannelDispatcher>,
}

impl AnnouncementDateTriggerJob {
    /// Creates the job.
    pub fn new(
        configs: Arc<dyn NotificationConfigRepository>,
        users: Arc<dyn UserRepository>,
        collector: Arc<ReleaseCollector>,
        dispatcher: Arc<ChannelDispatcher>,
    ) -> Self {
        Self {
            configs,
            users,
            collector,
            dispatcher,
        }
    }

    async fn process(&self, config: &NotificationConfig) -> AppResult<bool> {
        let user = self
            .users
            .find_by_id(config.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", config.user_id)))?;

        let announced = self
            .collector
            .collect_for_announcement_date_today(config.user_id, config.notify_reissues)
            .await?;

        if announced.is_empty() {
            return Ok(false);
        }

        self.dispatcher
            .sender_for(config.channel)
            .send_announcement_date_message(&user, &announced)
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl TriggerJob for AnnouncementDateTriggerJob {
    fn name(&self) -> &'static str {
        "announcement_date_notification"
    }

    async fn run(&self) -> AppResult<TriggerOutcome> {
        let mut outcome = TriggerOutcome::default();

        for config in self.configs.find_all_active().await? {
            if !config.notification_at_announcement_date {
                continue;
            }
            outcome.processed += 1;

            match self.process(&config).await {
                Ok(true) => outcome.sent += 1,
                Ok(false) => {}
                Err(e) => {
                    outcome.failed += 1;
                    tracing::error!(
                        user_id = %config.user_id,
                        channel = %config.channel,
                        "Announcement-date notification failed: {}",
                        e
                    );
                }
            }
        }

        Ok(outcome)
    }
}
