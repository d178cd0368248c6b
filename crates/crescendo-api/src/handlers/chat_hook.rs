//! Inbound chat webhook.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// The message shape the chat transport's webhook delivers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInboundMessage {
    /// Raw message text; expected to carry a pairing code.
    pub text: String,
    /// The sending chat's identity.
    pub chat_id: i64,
}

/// POST /hooks/chat
///
/// Drives phase 2 of the binding handshake. The transport always gets a 204:
/// protocol-level replies (success, unreadable code, unknown code) travel
/// back through the chat transport itself, and even an internal failure is
/// not worth a webhook retry.
pub async fn receive(
    State(state): State<AppState>,
    Json(message): Json<ChatInboundMessage>,
) -> StatusCode {
    if let Err(e) = state
        .bindings
        .complete_registration(&message.text, message.chat_id)
        .await
    {
        tracing::error!(chat_id = message.chat_id, "Chat webhook processing failed: {}", e);
    }

    StatusCode::NO_CONTENT
}
