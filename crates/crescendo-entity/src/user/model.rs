//! User entity model.
//!
//! Account registration, authentication, and profile management live in the
//! surrounding platform; the notification engine only reads accounts to
//! address messages and to exclude disabled users from trigger runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address used by the email channel.
    pub email: String,
    /// Whether the account is enabled. Disabled accounts receive nothing.
    pub enabled: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
