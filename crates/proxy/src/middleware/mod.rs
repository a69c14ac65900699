//! HTTP middleware stack for the proxy.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (add unique ID to each request)
//! 4. App proxy signature (on `/api` only)

pub mod app_proxy;
pub mod request_id;

pub use app_proxy::{sign_query, verify_app_proxy_signature, verify_query};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
