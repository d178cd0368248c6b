//! Release index client configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external release index service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Base URL of the release index API.
    pub base_url: String,
    /// Bearer token for the index API, if the deployment requires one.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    10
}
