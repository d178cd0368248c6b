//! Release index HTTP client.

use std::time::Duration;

use async_trait::async_trait;

use crescendo_core::config::index::IndexConfig;
use crescendo_core::error::{AppError, ErrorKind};
use crescendo_core::result::AppResult;
use crescendo_core::traits::ReleaseSource;
use crescendo_core::types::ReleaseWindow;
use crescendo_entity::release::Release;

use crate::dto::{ReleasesRequest, ReleasesResponse};

/// HTTP client for the release index query API.
#[derive(Debug, Clone)]
pub struct IndexClient {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl IndexClient {
    /// Create a client from configuration.
    pub fn new(config: &IndexConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl ReleaseSource for IndexClient {
    async fn find_releases(
        &self,
        artist_names: &[String],
        window: ReleaseWindow,
    ) -> AppResult<Vec<Release>> {
        let url = format!("{}/releases", self.base_url);
        let body = ReleasesRequest {
            artists: artist_names.to_vec(),
            date_from: window.from,
            date_to: window.to,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Release index request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Release index returned HTTP {status}"
            )));
        }

        let payload: ReleasesResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Release index returned an unreadable payload: {e}"),
                e,
            )
        })?;

        tracing::debug!(
            artists = artist_names.len(),
            releases = payload.releases.len(),
            "Release index query completed"
        );

        Ok(payload.releases.into_iter().map(Release::from).collect())
    }
}
