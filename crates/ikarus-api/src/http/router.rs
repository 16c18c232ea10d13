//! Axum router configuration with middleware.
//!
//! Routes: `POST /api/chat` (plus `OPTIONS` when CORS is on) and
//! `GET /health`. Middleware: request timeout, tracing, CORS.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use ikarus_types::chat::CHAT_PATH;
use ikarus_types::config::ServerConfig;

use crate::http::handlers;
use crate::state::AppState;

/// Build the relay router.
///
/// CORS is applied outermost so error and timeout responses carry the
/// headers too. A request that outlives `request_timeout_secs` is answered
/// with an empty 500.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let chat_route = if server.cors {
        post(handlers::chat::chat).options(handlers::chat::preflight)
    } else {
        post(handlers::chat::chat)
    };

    let router = Router::new()
        .route(CHAT_PATH, chat_route)
        .route("/health", get(handlers::health::health_check))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::INTERNAL_SERVER_ERROR,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if server.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}
