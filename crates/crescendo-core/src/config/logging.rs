//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Logging output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level filter when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format: "pretty" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}
