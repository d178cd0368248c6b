//! # crescendo-notify
//!
//! Outbound transport implementations: SMTP mail via lettre and chat
//! messages via the Telegram Bot API. Both implement the transport traits
//! from `crescendo-core`; formatting happens upstream in the senders.

pub mod mail;
pub mod telegram;

pub use mail::SmtpMailTransport;
pub use telegram::TelegramApiTransport;
