//! Notification settings handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crescendo_core::error::AppError;
use crescendo_entity::notification::{
    NotificationChannel, NotificationConfig, UpdateNotificationConfig,
};

use crate::error::ApiError;
use crate::extractors::Actor;
use crate::state::AppState;

/// One config as returned to the settings UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfigResponse {
    /// Delivery channel.
    pub channel: NotificationChannel,
    /// Master on/off switch.
    pub notify: bool,
    /// Notification interval in weeks.
    pub frequency_weeks: i32,
    /// Release-date toggle.
    pub notification_at_release_date: bool,
    /// Announcement-date toggle.
    pub notification_at_announcement_date: bool,
    /// Reissue toggle.
    pub notify_reissues: bool,
    /// Day of the last periodic notification.
    pub last_notification_date: Option<NaiveDate>,
}

impl From<NotificationConfig> for NotificationConfigResponse {
    fn from(config: NotificationConfig) -> Self {
        Self {
            channel: config.channel,
            notify: config.notify,
            frequency_weeks: config.frequency_weeks,
            notification_at_release_date: config.notification_at_release_date,
            notification_at_announcement_date: config.notification_at_announcement_date,
            notify_reissues: config.notify_reissues,
            last_notification_date: config.last_notification_date,
        }
    }
}

/// Response of the pairing-code endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    /// The code to send to the bot.
    pub registration_id: i32,
}

/// GET /api/notification-settings
pub async fn list(
    Actor(ctx): Actor,
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationConfigResponse>>, ApiError> {
    let configs = state.settings.list_for(&ctx).await?;
    Ok(Json(configs.into_iter().map(Into::into).collect()))
}

/// PUT /api/notification-settings/{channel}
pub async fn update(
    Actor(ctx): Actor,
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(changes): Json<UpdateNotificationConfig>,
) -> Result<Json<NotificationConfigResponse>, ApiError> {
    let channel: NotificationChannel = channel
        .parse()
        .map_err(|e: crescendo_entity::notification::channel::ParseChannelError| {
            ApiError(AppError::validation(e.to_string()))
        })?;

    let updated = state.settings.update(&ctx, channel, &changes).await?;
    Ok(Json(updated.into()))
}

/// POST /api/notification-settings/telegram/registration
pub async fn start_registration(
    Actor(ctx): Actor,
    State(state): State<AppState>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let registration_id = state.bindings.start_registration(&ctx).await?;
    Ok(Json(RegistrationResponse { registration_id }))
}

/// DELETE /api/notification-settings/telegram
pub async fn remove_binding(
    Actor(ctx): Actor,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.bindings.remove_binding(&ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
