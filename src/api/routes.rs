//! API Route Configuration

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::{admin_auth_middleware, logging_middleware};

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Admin routes carry their own auth layer
    let admin = Router::new()
        .route("/api/registry", post(handlers::update_registry))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        // Address checks
        .route("/api/check", post(handlers::check_address))
        .route("/api/stats", get(handlers::get_stats))
        // Registry
        .route("/api/registry/stats", get(handlers::registry_stats))
        // Health
        .route("/health", get(handlers::health_check))
        .merge(admin)
        .with_state(state)
        // Outermost first
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
}
