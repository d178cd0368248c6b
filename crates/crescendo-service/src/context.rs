//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Resolved at the HTTP boundary and passed into service methods so that
/// every operation knows *who* is acting; there is no ambient identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for the given user.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}
