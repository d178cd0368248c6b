//! Transient release model.
//!
//! Releases are never persisted by the engine; they are fetched from the
//! release index per trigger run, filtered, formatted, and forgotten.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a release as reported by the release index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseState {
    /// Confirmed release. Only this state is ever delivered to users.
    Ok,
    /// Announced but not yet confirmed.
    Announced,
    /// Flagged as faulty by the index.
    Faulty,
    /// Removed from the index.
    Deleted,
    /// Any state this build does not know about.
    #[serde(other)]
    Unknown,
}

/// A single release of a followed artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// The releasing artist's name.
    pub artist: String,
    /// Title of the release.
    pub album_title: String,
    /// The day the release comes (or came) out.
    pub release_date: NaiveDate,
    /// The day the release was announced.
    pub announcement_date: NaiveDate,
    /// Lifecycle state reported by the index.
    pub state: ReleaseState,
    /// Whether this is a re-release of previously released material.
    pub reissue: bool,
}

impl Release {
    /// Whether the release is in the canonical confirmed state.
    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, ReleaseState::Ok)
    }

    /// Identity used for de-duplicating index results.
    pub fn dedup_key(&self) -> (&str, &str, NaiveDate) {
        (
            self.artist.as_str(),
            self.album_title.as_str(),
            self.release_date,
        )
    }
}
