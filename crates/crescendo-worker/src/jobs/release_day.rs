//! Daily release-date notification trigger.

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

/// Notifies opted-in users about releases that come out today.
///
/// Stateless by design: each run recomputes today's releases from the index,
/// and a re-run on the same day sends again. No per-config state is written.
pub struct ReleaseDateTriggerJob {
    configs: Arc<dyn NotificationConfigRepository>,
    users: Arc<dyn UserRepository>,
    collector: Arc<ReleaseCollector>,
    dispatcher: Arc<ChannelDispatcher>,
}

impl ReleaseDateTriggerJob {
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

        let todays = self
            .collector
            .collect_for_release_date_today(config.user_id, config.notify_reissues)
            .await?;

        if todays.is_empty() {
            return Ok(false);
        }

        self.dispatcher
            .sender_for(config.channel)
            .send_release_date_message(&user, &todays)
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl TriggerJob for ReleaseDateTriggerJob {
    fn name(&self) -> &'static str {
        "release_date_notification"
    }

    async fn run(&self) -> AppResult<TriggerOutcome> {
        let mut outcome = TriggerOutcome::default();

        for config in self.configs.find_all_active().await? {
            if !config.notification_at_release_date {
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
                        "Release-date notification failed: {}",
                        e
                    );
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::support::{email_config, release_in_days, Fixture};

    fn job(fixture: &Fixture) -> ReleaseDateTriggerJob {
        ReleaseDateTriggerJob::new(
            Arc::clone(&fixture.configs) as Arc<dyn NotificationConfigRepository>,
            Arc::clone(&fixture.users) as Arc<dyn UserRepository>,
            Arc::clone(&fixture.collector),
            Arc::clone(&fixture.dispatcher),
        )
    }

    fn opted_in_config() -> crescendo_entity::notification::NotificationConfig {
        let mut config = email_config(false, 4);
        config.notification_at_release_date = true;
        config
    }

    #[tokio::test]
    async fn test_sends_todays_releases() {
        let fixture = Fixture::new();
        let user_id = fixture.add_user(&["Opeth"], opted_in_config());
        fixture.add_release(release_in_days(0));
        fixture.add_release(release_in_days(3));

        let outcome = job(&fixture).run().await.unwrap();

        assert_eq!(outcome.sent, 1);
        let sent = fixture.email_sender.release_day.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, user_id);
        assert_eq!(sent[0].1.len(), 1);
    }

    #[tokio::test]
    async fn test_nothing_out_today_sends_nothing() {
        let fixture = Fixture::new();
        fixture.add_user(&["Opeth"], opted_in_config());
        fixture.add_release(release_in_days(3));

        let outcome = job(&fixture).run().await.unwrap();

        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.sent, 0);
        assert!(fixture.email_sender.release_day.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_opted_out_config_is_skipped() {
        let fixture = Fixture::new();
        fixture.add_user(&["Opeth"], email_config(true, 4));
        fixture.add_release(release_in_days(0));

        let outcome = job(&fixture).run().await.unwrap();

        assert_eq!(outcome.processed, 0);
        assert!(fixture.email_sender.release_day.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rerun_same_day_is_idempotent_over_unchanged_data() {
        let fixture = Fixture::new();
        fixture.add_user(&["Opeth"], opted_in_config());
        fixture.add_release(release_in_days(0));

        let trigger = job(&fixture);
        trigger.run().await.unwrap();
        trigger.run().await.unwrap();

        let sent = fixture.email_sender.release_day.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1, sent[1].1);
    }
}
