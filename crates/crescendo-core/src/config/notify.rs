//! Outbound transport configuration: mail and Telegram.

use serde::{Deserialize, Serialize};

/// SMTP mail transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP relay hostname.
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// RFC 5322 "From" address on outgoing notifications.
    pub from_address: String,
    /// Optional SMTP username.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional SMTP password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API base URL. Overridable for tests and proxies.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// The bot token issued by BotFather.
    pub bot_token: String,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}
