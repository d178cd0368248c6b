//! Weekly frequency notification trigger.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing;

use crescendo_core::error::AppError;
use crescendo_core::result::AppResult;
use crescendo_core::traits::{NotificationConfigRepository, UserRepository};
use crescendo_entity::notification::NotificationConfig;
use crescendo_service::notification::ChannelDispatcher;
use crescendo_service::release::ReleaseCollector;

use crate::trigger::{TriggerJob, TriggerOutcome};

/// Sends the periodic release overview to every due config.
///
/// A config is due when no notification was ever sent or its interval has
/// elapsed. Due configs have their `last_notification_date` advanced to
/// today even when there was nothing to report; being due and having
/// content are independent. Configs that are not due are left untouched.
pub struct FrequencyTriggerJob {
    configs: Arc<dyn NotificationConfigRepository>,
    users: Arc<dyn UserRepository>,
    collector: Arc<ReleaseCollector>,
    dispatcher: Arc<ChannelDispatcher>,
}

impl FrequencyTriggerJob {
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

    /// Process one due config: collect, dispatch, advance.
    ///
    /// Returns whether a message was dispatched. A failure anywhere leaves
    /// `last_notification_date` untouched, so the config stays due for the
    /// next run.
    async fn process(&self, config: &NotificationConfig, today: NaiveDate) -> AppResult<bool> {
        let user = self
            .users
            .find_by_id(config.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", config.user_id)))?;

        let (upcoming, recent) = self
            .collector
            .collect_for_frequency(config.user_id, config.frequency_weeks, config.notify_reissues)
            .await?;

        let has_content = !upcoming.is_empty() || !recent.is_empty();
        if has_content {
            self.dispatcher
                .sender_for(config.channel)
                .send_frequency_message(&user, &upcoming, &recent)
                .await?;
        }

        self.configs
            .advance_last_notification(config.id, today)
            .await?;

        Ok(has_content)
    }
}

#[async_trait]
impl TriggerJob for FrequencyTriggerJob {
    fn name(&self) -> &'static str {
        "frequency_notification"
    }

    async fn run(&self) -> AppResult<TriggerOutcome> {
        let today = Utc::now().date_naive();
        let mut outcome = TriggerOutcome::default();

        for config in self.configs.find_all_active().await? {
            if !config.notify || !config.is_due(today) {
                continue;
            }
            outcome.processed += 1;

            match self.process(&config, today).await {
                Ok(true) => outcome.sent += 1,
                Ok(false) => {}
                Err(e) => {
                    outcome.failed += 1;
                    tracing::error!(
                        user_id = %config.user_id,
                        channel = %config.channel,
                        "Frequency notification failed: {}",
                        e
                    );
                }
            }
        }

        Ok(outcome)
    }
}
