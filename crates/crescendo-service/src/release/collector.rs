//! Translates "user + trigger kind" into concrete, filtered release lists.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crescendo_core::result::AppResult;
use crescendo_core::traits::{FollowRepository, ReleaseSource};
use crescendo_core::types::ReleaseWindow;
use crescendo_entity::release::Release;

/// Collects the candidate releases for one user and one trigger kind.
///
/// Applies the same post-filters to every query, in order: only confirmed
/// releases survive, reissues are dropped unless enabled, and duplicates
/// (same artist, title, and release date) are removed. A user following no
/// artists yields empty lists without touching the release index.
pub struct ReleaseCollector {
    source: Arc<dyn ReleaseSource>,
    follows: Arc<dyn FollowRepository>,
}

impl ReleaseCollector {
    /// Creates a new collector.
    pub fn new(source: Arc<dyn ReleaseSource>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { source, follows }
    }

    /// Upcoming and recent releases for the periodic frequency notification.
    ///
    /// Upcoming covers `[today, today + frequency_weeks]`, recent covers
    /// `[today - frequency_weeks, yesterday]`.
    pub async fn collect_for_frequency(
        &self,
        user_id: Uuid,
        frequency_weeks: i32,
        notify_reissues: bool,
    ) -> AppResult<(Vec<Release>, Vec<Release>)> {
        let artists = self.follows.followed_artist_names(user_id).await?;
        if artists.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let today = Utc::now().date_naive();
        let upcoming = self
            .query(
                &artists,
                ReleaseWindow::weeks_ahead(today, frequency_weeks),
                notify_reissues,
            )
            .await?;
        let recent = self
            .query(
                &artists,
                ReleaseWindow::weeks_behind(today, frequency_weeks),
                notify_reissues,
            )
            .await?;

        Ok((upcoming, recent))
    }

    /// Releases that come out today.
    pub async fn collect_for_release_date_today(
        &self,
        user_id: Uuid,
        notify_reissues: bool,
    ) -> AppResult<Vec<Release>> {
        let artists = self.follows.followed_artist_names(user_id).await?;
        if artists.is_empty() {
            return Ok(Vec::new());
        }

        let today = Utc::now().date_naive();
        self.query(&artists, ReleaseWindow::single_day(today), notify_reissues)
            .await
    }

    /// Releases that were announced today.
    ///
    /// The index is queried from today onwards (announcements always precede
    /// the release day) and the result is narrowed to announcements made
    /// today.
    pub async fn collect_for_announcement_date_today(
        &self,
        user_id: Uuid,
        notify_reissues: bool,
    ) -> AppResult<Vec<Release>> {
        let artists = self.follows.followed_artist_names(user_id).await?;
        if artists.is_empty() {
            return Ok(Vec::new());
        }

        let today = Utc::now().date_naive();
        let mut releases = self
            .query(&artists, ReleaseWindow::starting_at(today), notify_reissues)
            .await?;
        releases.retain(|release| release.announcement_date == today);
        Ok(releases)
    }

    async fn query(
        &self,
        artists: &[String],
        window: ReleaseWindow,
        notify_reissues: bool,
    ) -> AppResult<Vec<Release>> {
        let releases = self.source.find_releases(artists, window).await?;
        Ok(filter_releases(releases, notify_reissues))
    }
}

/// State filter, reissue filter, then order-preserving de-duplication.
fn filter_releases(releases: Vec<Release>, notify_reissues: bool) -> Vec<Release> {
    let mut seen: HashSet<(String, String, NaiveDate)> = HashSet::new();
    releases
        .into_iter()
        .filter(|release| release.is_confirmed())
        .filter(|release| notify_reissues || !release.reissue)
        .filter(|release| {
            let (artist, title, date) = release.dedup_key();
            seen.insert((artist.to_string(), title.to_string(), date))
        })
        .collect()
}
