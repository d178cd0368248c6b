//! Delivery channel enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A delivery channel for notifications.
///
/// The enumeration is closed by construction: every (user, channel) pair owns
/// at most one [`NotificationConfig`](super::NotificationConfig), and channel
/// dispatch matches exhaustively on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_channel", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    /// Delivery via email.
    Email,
    /// Delivery via a bound Telegram chat.
    Telegram,
}

impl NotificationChannel {
    /// All defined channels.
    pub const ALL: [NotificationChannel; 2] = [Self::Email, Self::Telegram];

    /// Return the channel as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Telegram => "telegram",
        }
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown channel name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid notification channel: '{0}'. Expected one of: email, telegram")]
pub struct ParseChannelError(pub String);

impl FromStr for NotificationChannel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "telegram" => Ok(Self::Telegram),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}
