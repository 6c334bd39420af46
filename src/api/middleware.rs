//! API Middleware (Admin Auth, Logging)

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::handlers::AppState;
use crate::models::errors::AppError;

/// Guards registry administration with the `X-API-Key` header
pub async fn admin_auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.admin_key.as_deref() else {
        warn!("Registry update attempted but no admin key is configured");
        return Err(AppError::forbidden("Registry updates are disabled"));
    };

    let api_key = headers.get("X-API-Key").and_then(|v| v.to_str().ok());

    match api_key {
        Some(key) if key == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!("Invalid admin API key attempted");
            Err(AppError::unauthorized())
        }
        None => Err(AppError::unauthorized()),
    }
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %latency.as_millis(),
        "Request completed"
    );

    response
}
