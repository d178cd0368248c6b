//! Artist follow repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crescendo_core::error::{AppError, ErrorKind};
use crescendo_core::result::AppResult;
use crescendo_core::traits::FollowRepository;

/// Repository for reading which artists a user follows.
#[derive(Debug, Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new follow repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    async fn followed_artist_names(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT artist_name FROM artist_follows WHERE user_id = $1 \
             ORDER BY artist_name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list followed artists", e)
        })
    }
}
