//! HTTP route handlers for the proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (Admin API credentials present)
//!
//! # Shopify app proxy target (signature always verified)
//! GET  /api                    - Static "proxy is active" payload
//! POST /api                    - Resolve a gift card or discount code
//! ```

pub mod redeem;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
};

use crate::middleware::verify_app_proxy_signature;
use crate::state::AppState;

/// Build the application router (without the outer tracing and Sentry layers).
pub fn routes(state: &AppState) -> Router<AppState> {
    let api = Router::new()
        .route("/api", get(redeem::status).post(redeem::redeem))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            verify_app_proxy_signature,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(api)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the Admin API credentials are missing.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.credentials_configured() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
