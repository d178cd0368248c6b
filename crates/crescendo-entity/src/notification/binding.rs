//! Chat channel binding entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pairing state between a Telegram notification config and an external chat.
///
/// One-to-one with a [`NotificationConfig`](super::NotificationConfig) of the
/// Telegram channel. The `registration_id` is a short-lived, human-typed
/// pairing code; while non-null it is unique across all bindings, because the
/// external chat system uses it to locate the right user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChannelBinding {
    /// Unique binding identifier.
    pub id: Uuid,
    /// The owning Telegram notification config.
    pub notification_config_id: Uuid,
    /// Pending pairing code, if a registration is in flight.
    pub registration_id: Option<i32>,
    /// The external chat identity once the handshake completed.
    pub chat_id: Option<i64>,
    /// When the binding was created.
    pub created_at: DateTime<Utc>,
    /// When the binding was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Derived lifecycle state of a [`ChannelBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingState {
    /// No code issued, no chat bound.
    Unbound,
    /// A pairing code is outstanding.
    Pending,
    /// The chat identity is resolved.
    Bound,
}

impl ChannelBinding {
    /// Create a binding with no code and no chat.
    pub fn new_unbound(notification_config_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            notification_config_id,
            registration_id: None,
            chat_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current lifecycle state.
    ///
    /// An outstanding code always reads as `Pending`, even when a previous
    /// chat binding is still present: re-registration starts a fresh pending
    /// handshake and the old chat stays addressable until completion
    /// overwrites it.
    pub fn state(&self) -> BindingState {
        if self.registration_id.is_some() {
            BindingState::Pending
        } else if self.chat_id.is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    /// Start (or restart) a registration with a fresh pairing code. The chat
    /// identity, if any, is left untouched.
    pub fn begin_registration(&mut self, code: i32) {
        self.registration_id = Some(code);
        self.updated_at = Utc::now();
    }

    /// Complete the handshake: record the chat identity and retire the code.
    pub fn complete_registration(&mut self, chat_id: i64) {
        self.chat_id = Some(chat_id);
        self.registration_id = None;
        self.updated_at = Utc::now();
    }
}
