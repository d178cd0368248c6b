//! Request handlers.

pub mod chat_hook;
pub mod health;
pub mod settings;
