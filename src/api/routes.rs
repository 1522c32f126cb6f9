//! API Routes
//!
//! Configures the Axum router with all lookup server endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cached_handler, clear_all_handler, clear_handler, has_handler, health_handler,
    list_handler, resolve_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /resolve/:id` - Resolve an identifier (memoized)
/// - `GET /has/:id` - Ask the provider whether an identifier exists
/// - `GET /cached/:id` - Check whether an identifier is cached
/// - `GET /cache` - List cached identifiers
/// - `DELETE /cache/:id` - Release one cached entry
/// - `DELETE /cache` - Release every cached entry
/// - `GET /stats` - Get lookup statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/resolve/:id", get(resolve_handler))
        .route("/has/:id", get(has_handler))
        .route("/cached/:id", get(cached_handler))
        .route("/cache", get(list_handler).delete(clear_all_handler))
        .route("/cache/:id", delete(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
