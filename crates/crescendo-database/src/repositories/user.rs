//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crescendo_core::error::{AppError, ErrorKind};
use crescendo_core::result::AppResult;
use crescendo_core::traits::UserRepository;
use crescendo_entity::user::User;

/// Repository for reading user accounts.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }
}
