//! The per-channel sender contract.

use async_trait::async_trait;

use crescendo_core::result::AppResult;
use crescendo_entity::release::Release;
use crescendo_entity::user::User;

/// Formats and transmits notifications for one delivery channel.
///
/// Each variant owns its formatting rules and its transport collaborator.
/// Callers treat sends as fire-and-forget: a failure is reported as an error
/// but must only ever affect the one recipient it belongs to.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// The periodic notification: upcoming and recently released material.
    async fn send_frequency_message(
        &self,
        user: &User,
        upcoming: &[Release],
        recent: &[Release],
    ) -> AppResult<()>;

    /// Releases that come out today.
    async fn send_release_date_message(&self, user: &User, todays: &[Release]) -> AppResult<()>;

    /// Releases that were announced today.
    async fn send_announcement_date_message(
        &self,
        user: &User,
        todays: &[Release],
    ) -> AppResult<()>;
}

/// One formatted line per release, shared by both channels.
pub(crate) fn release_line(release: &Release) -> String {
    format!(
        "{} - {} ({})",
        release.artist,
        release.album_title,
        release.release_date.format("%Y-%m-%d")
    )
}
