//! Route definitions for the Crescendo HTTP API.
//!
//! Settings routes are mounted under `/api`; the chat webhook lives at the
//! root so the transport's callback URL stays stable.

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/notification-settings", get(handlers::settings::list))
        .route(
            "/notification-settings/{channel}",
            put(handlers::settings::update),
        )
        .route(
            "/notification-settings/telegram/registration",
            post(handlers::settings::start_registration),
        )
        .route(
            "/notification-settings/telegram/binding",
            delete(handlers::settings::remove_binding),
        );

    let hook_routes = Router::new().route("/hooks/chat", post(handlers::chat_hook::receive));

    Router::new()
        .nest("/api", api_routes)
        .merge(hook_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
