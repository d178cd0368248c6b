//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crescendo_core::error::AppError;
use crescendo_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated user id, set by the upstream gateway.
const USER_ID_HEADER: &str = "x-user-id";

/// Extracts the acting user from the gateway-provided header.
///
/// The gateway authenticates every request before it reaches this service;
/// a missing or malformed header is a misconfigured deployment, not a user
/// error, but is still answered with a 4xx rather than trusted.
pub struct Actor(pub RequestContext);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError(AppError::validation(format!(
                    "Missing '{USER_ID_HEADER}' header"
                )))
            })?;

        let user_id = Uuid::parse_str(header).map_err(|_| {
            ApiError(AppError::validation(format!(
                "Malformed '{USER_ID_HEADER}' header"
            )))
        })?;

        Ok(Actor(RequestContext::new(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Actor, ApiError> {
        let (mut parts, _) = request.into_parts();
        Actor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_user_from_header() {
        let user_id = Uuid::new_v4();
        let request = Request::builder()
            .header(USER_ID_HEADER, user_id.to_string())
            .body(())
            .unwrap();

        let Actor(ctx) = extract(request).await.unwrap();
        assert_eq!(ctx.user_id, user_id);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let request = Request::builder().body(()).unwrap();
        assert!(extract(request).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_header_is_rejected() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();
        assert!(extract(request).await.is_err());
    }
}
