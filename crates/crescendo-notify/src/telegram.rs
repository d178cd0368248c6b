//! Telegram Bot API chat transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crescendo_core::config::notify::TelegramConfig;
use crescendo_core::error::{AppError, ErrorKind};
use crescendo_core::result::AppResult;
use crescendo_core::traits::ChatTransport;

/// HTTP request timeout for a single Bot API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimal Bot API response envelope. Only the `ok` flag and the error
/// description matter here.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends chat messages through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramApiTransport {
    client: reqwest::Client,
    send_message_url: String,
}

impl TelegramApiTransport {
    /// Create a transport from configuration.
    pub fn new(config: &TelegramConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                config.bot_token
            ),
        })
    }
}

#[async_trait]
impl ChatTransport for TelegramApiTransport {
    async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()> {
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(&self.send_message_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Transport,
                    format!("Telegram request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        let body: BotApiResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("Telegram returned an unreadable response (HTTP {status}): {e}"),
                e,
            )
        })?;

        if !body.ok {
            return Err(AppError::transport(format!(
                "Telegram rejected the message: {}",
                body.description.as_deref().unwrap_or("no description")
            )));
        }

        tracing::info!(chat_id, "Chat message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_url_embeds_token() {
        let transport = TelegramApiTransport::new(&TelegramConfig {
            api_base: "https://api.telegram.org/".to_string(),
            bot_token: "123:abc".to_string(),
        })
        .unwrap();

        assert_eq!(
            transport.send_message_url,
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }
}
