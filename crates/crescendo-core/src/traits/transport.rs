//! Outbound delivery transports.
//!
//! One operation each: deliver an already-formatted message to a recipient
//! identity. Formatting belongs to the senders; timeout and retry policy
//! belong to the transport implementations.

use async_trait::async_trait;

use crate::result::AppResult;

/// Delivers notification mail.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send a plain-text mail to the given address.
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Delivers chat messages to a bound chat identity.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()>;
}
