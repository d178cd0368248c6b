//! Per-channel notification configuration entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::channel::NotificationChannel;

/// Default notification frequency for newly created configs.
const DEFAULT_FREQUENCY_WEEKS: i32 = 4;

/// Delivery preferences and trigger state for one (user, channel) pair.
///
/// Exactly one config exists per pair; the channel is immutable after
/// creation. The frequency trigger is the only writer of
/// `last_notification_date`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationConfig {
    /// Unique config identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// The delivery channel this config applies to.
    pub channel: NotificationChannel,
    /// Master on/off switch for the periodic frequency notification.
    pub notify: bool,
    /// Notification interval in weeks. Zero means "always due".
    pub frequency_weeks: i32,
    /// Whether to notify on the day a release comes out.
    pub notification_at_release_date: bool,
    /// Whether to notify on the day a release is announced.
    pub notification_at_announcement_date: bool,
    /// Whether reissues of previously released material are included.
    pub notify_reissues: bool,
    /// Day of the last frequency notification, if any was ever sent.
    pub last_notification_date: Option<NaiveDate>,
    /// When the config was created.
    pub created_at: DateTime<Utc>,
    /// When the config was last updated.
    pub updated_at: DateTime<Utc>,
}

impl NotificationConfig {
    /// Create a fresh config for a (user, channel) pair with everything
    /// switched off. The periodic notification stays disabled until the user
    /// opts in.
    pub fn new_default(user_id: Uuid, channel: NotificationChannel) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            channel,
            notify: false,
            frequency_weeks: DEFAULT_FREQUENCY_WEEKS,
            notification_at_release_date: false,
            notification_at_announcement_date: false,
            notify_reissues: false,
            last_notification_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the frequency trigger should fire for this config today.
    ///
    /// Due when no notification was ever sent, or when at least
    /// `frequency_weeks` full weeks have elapsed since the last one. With
    /// `frequency_weeks == 0` the check degenerates to "always due" once a
    /// date is set; that behavior is intentional.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        match self.last_notification_date {
            None => true,
            Some(last) => (today - last).num_weeks() >= i64::from(self.frequency_weeks),
        }
    }

    /// Apply a settings update. The channel is never changed.
    pub fn apply(&mut self, update: &UpdateNotificationConfig) {
        self.notify = update.notify;
        self.frequency_weeks = update.frequency_weeks;
        self.notification_at_release_date = update.notification_at_release_date;
        self.notification_at_announcement_date = update.notification_at_announcement_date;
        self.notify_reissues = update.notify_reissues;
        self.updated_at = Utc::now();
    }
}

/// Data for updating an existing config's preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNotificationConfig {
    /// New master on/off switch value.
    pub notify: bool,
    /// New notification interval in weeks.
    pub frequency_weeks: i32,
    /// New release-date toggle value.
    pub notification_at_release_date: bool,
    /// New announcement-date toggle value.
    pub notification_at_announcement_date: bool,
    /// New reissue toggle value.
    pub notify_reissues: bool,
}
