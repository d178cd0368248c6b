//! Channel-to-sender dispatch.

use std::sync::Arc;

use crescendo_entity::notification::NotificationChannel;

use super::sender::NotificationSender;

/// Maps a delivery channel to the sender that serves it.
///
/// One field per channel and an exhaustive match: adding a channel is a
/// localized change (new enum variant, new field, one match arm), and an
/// unhandled channel cannot exist at runtime.
pub struct ChannelDispatcher {
    email: Arc<dyn NotificationSender>,
    telegram: Arc<dyn NotificationSender>,
}

impl ChannelDispatcher {
    /// Creates a dispatcher over the two channel senders.
    pub fn new(email: Arc<dyn NotificationSender>, telegram: Arc<dyn NotificationSender>) -> Self {
        Self { email, telegram }
    }

    /// The sender serving the given channel.
    pub fn sender_for(&self, channel: NotificationChannel) -> Arc<dyn NotificationSender> {
        match channel {
            NotificationChannel::Email => Arc::clone(&self.email),
            NotificationChannel::Telegram => Arc::clone(&self.telegram),
        }
    }
}
