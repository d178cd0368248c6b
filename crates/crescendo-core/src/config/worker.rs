//! Notification trigger schedules.

use serde::{Deserialize, Serialize};

/// Cron schedules for the three notification triggers.
///
/// Expressions use the six-field form (seconds first) understood by the
/// scheduler. Each trigger fires independently; a firing that would overlap a
/// still-running body of the same trigger is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the trigger scheduler is started at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Weekly frequency notification schedule.
    #[serde(default = "default_frequency_cron")]
    pub frequency_cron: String,
    /// Daily release-date notification schedule.
    #[serde(default = "default_release_date_cron")]
    pub release_date_cron: String,
    /// Daily announcement-date notification schedule.
    #[serde(default = "default_announcement_date_cron")]
    pub announcement_date_cron: String,
}

fn default_true() -> bool {
    true
}

/// Friday at 07:00.
fn default_frequency_cron() -> String {
    "0 0 7 * * 5".to_string()
}

/// Every day at 07:00.
fn default_release_date_cron() -> String {
    "0 0 7 * * *".to_string()
}

/// Every day at 07:30.
fn default_announcement_date_cron() -> String {
    "0 30 7 * * *".to_string()
}
