//! Release index query interface.

use async_trait::async_trait;

use crescendo_entity::release::Release;

use crate::result::AppResult;
use crate::types::ReleaseWindow;

/// Queries the external release index for releases of the given artists
/// inside a date window.
///
/// Implementations do not filter by lifecycle state or reissue flag; that is
/// the collector's job. Failures propagate: the caller decides what a failed
/// query means for the unit of work it belongs to.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Find releases for the named artists within the window.
    async fn find_releases(
        &self,
        artist_names: &[String],
        window: ReleaseWindow,
    ) -> AppResult<Vec<Release>>;
}
