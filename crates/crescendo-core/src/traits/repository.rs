//! Repository traits for the engine's persistent entities.
//!
//! Entity-specific rather than generic: the engine's write operations are
//! few and deliberate, and the two read-then-write transitions
//! ([`NotificationConfigRepository::advance_last_notification`] and
//! [`ChannelBindingRepository::claim_registration`]) must be atomic per row,
//! which a generic CRUD surface cannot express.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crescendo_entity::notification::{ChannelBinding, NotificationChannel, NotificationConfig};
use crescendo_entity::user::User;

use crate::result::AppResult;

/// Read access to user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
}

/// Read access to artist follows.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// The distinct artist names a user follows.
    async fn followed_artist_names(&self, user_id: Uuid) -> AppResult<Vec<String>>;
}

/// Persistence for [`NotificationConfig`] rows.
#[async_trait]
pub trait NotificationConfigRepository: Send + Sync {
    /// All configs belonging to enabled users.
    async fn find_all_active(&self) -> AppResult<Vec<NotificationConfig>>;

    /// The config for one (user, channel) pair, if it exists.
    async fn find_by_user_and_channel(
        &self,
        user_id: Uuid,
        channel: NotificationChannel,
    ) -> AppResult<Option<NotificationConfig>>;

    /// Insert a new config.
    async fn insert(&self, config: &NotificationConfig) -> AppResult<()>;

    /// Update an existing config's preferences.
    async fn update(&self, config: &NotificationConfig) -> AppResult<()>;

    /// Set `last_notification_date` on one config row.
    ///
    /// Must be a single atomic write: no concurrent trigger run may observe
    /// a half-updated row.
    async fn advance_last_notification(&self, config_id: Uuid, date: NaiveDate) -> AppResult<()>;

    /// Delete all configs of a user. Returns the number of rows removed.
    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Persistence for [`ChannelBinding`] rows.
#[async_trait]
pub trait ChannelBindingRepository: Send + Sync {
    /// The binding owned by a notification config, if any.
    async fn find_by_config(&self, config_id: Uuid) -> AppResult<Option<ChannelBinding>>;

    /// Whether any binding currently holds this registration code.
    async fn registration_id_in_use(&self, code: i32) -> AppResult<bool>;

    /// Insert or replace a binding (keyed by its config).
    async fn upsert(&self, binding: &ChannelBinding) -> AppResult<()>;

    /// Atomically complete a registration: find the binding holding `code`,
    /// set its chat identity, clear the code, and return the updated row.
    ///
    /// Returns `None` when no binding holds the code, because it never
    /// existed or a racing completion claimed it first. At most one of two
    /// racing calls can win.
    async fn claim_registration(
        &self,
        code: i32,
        chat_id: i64,
    ) -> AppResult<Option<ChannelBinding>>;

    /// Delete all bindings of a user. Returns the number of rows removed.
    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<u64>;
}
