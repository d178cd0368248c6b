//! Notification configuration entities.

pub mod binding;
pub mod channel;
pub mod config;

pub use binding::{BindingState, ChannelBinding};
pub use channel::NotificationChannel;
pub use config::{NotificationConfig, UpdateNotificationConfig};
