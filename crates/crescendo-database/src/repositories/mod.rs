//! Concrete sqlx repository implementations.

pub mod artist_follow;
pub mod channel_binding;
pub mod notification_config;
pub mod user;

pub use artist_follow::PgFollowRepository;
pub use channel_binding::PgChannelBindingRepository;
pub use notification_config::PgNotificationConfigRepository;
pub use user::PgUserRepository;
