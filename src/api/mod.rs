//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;
mod state;

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Every transaction route needs a resolved caller
    let protected_routes = routes::transaction_routes().route_layer(
        axum::middleware::from_fn_with_state(state.clone(), middleware::auth_middleware),
    );

    Router::new()
        // Health check (no auth)
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes())
        .nest("/api/transactions", protected_routes)
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin may call the API
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
