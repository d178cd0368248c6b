//! Application state shared across all handlers.

use std::sync::Arc;

use crescendo_core::config::AppConfig;
use crescendo_service::notification::{ChannelBindingService, NotificationSettingsService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Per-channel notification settings
    pub settings: Arc<NotificationSettingsService>,
    /// Telegram binding handshake
    pub bindings: Arc<ChannelBindingService>,
}
