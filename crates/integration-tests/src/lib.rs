//! Integration tests for Gift Redeem.
//!
//! The tests drive the real axum router with `tower::ServiceExt::oneshot`
//! over the in-memory redemption backend, so no Shopify store is needed.
//!
//! ```bash
//! cargo test -p gift-redeem-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `redeem_endpoint` - `POST /api` resolution flows and status codes
//! - `app_proxy_signature` - Signature verification on `/api`
//! - `admin_client` - Admin API client against a local GraphQL stub

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use gift_redeem_core::{CodeDiscount, DiscountKind, DiscountStatus, GiftInstrument, Money};
use gift_redeem_proxy::config::{ProxyConfig, RedemptionConfig, ShopifyAdminConfig};
use gift_redeem_proxy::middleware::sign_query;
use gift_redeem_proxy::services::redemption::InMemoryBackend;
use gift_redeem_proxy::state::AppState;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;

/// App secret the test router verifies app proxy signatures with.
pub const TEST_APP_SECRET: &str = "hush";

/// Admin API settings pointing at a store that is never contacted.
#[must_use]
pub fn shopify_config() -> ShopifyAdminConfig {
    ShopifyAdminConfig {
        store: "test-store.myshopify.com".to_string(),
        api_version: "2026-01".to_string(),
        access_token: SecretString::from("shpat_integration_test_token"),
        request_timeout: Duration::from_secs(5),
    }
}

/// Proxy configuration for tests.
#[must_use]
pub fn test_config() -> ProxyConfig {
    ProxyConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        shopify: shopify_config(),
        app_proxy_secret: SecretString::from(TEST_APP_SECRET),
        redemption: RedemptionConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Full application router over `backend`.
pub fn test_app(config: ProxyConfig, backend: &Arc<InMemoryBackend>) -> Router {
    gift_redeem_proxy::app(AppState::new(config, backend.clone()))
}

/// An enabled USD gift card.
#[must_use]
pub fn gift_card(last_characters: &str, balance_cents: i64, customer: Option<&str>) -> GiftInstrument {
    GiftInstrument {
        id: format!("gid://shopify/GiftCard/{last_characters}"),
        last_characters: last_characters.to_string(),
        balance: Money::new(Decimal::new(balance_cents, 2), "USD"),
        enabled: true,
        customer_id: customer.map(String::from),
    }
}

/// A percentage-style code discount with the given status.
#[must_use]
pub fn code_discount(code: &str, status: DiscountStatus) -> CodeDiscount {
    CodeDiscount {
        id: format!("gid://shopify/DiscountCodeNode/{}", code.len()),
        code: code.to_string(),
        title: Some(format!("{code} promo")),
        status: Some(status),
        kind: DiscountKind::Basic,
        amount: None,
    }
}

/// A discount code previously provisioned for the gift card tagged `tag`.
#[must_use]
pub fn gift_discount(code: &str, tag: &str, amount_cents: i64) -> CodeDiscount {
    CodeDiscount {
        id: format!("gid://shopify/DiscountCodeNode/{tag}"),
        code: code.to_string(),
        title: Some(format!("Gift Card - {tag}")),
        status: Some(DiscountStatus::Active),
        kind: DiscountKind::Basic,
        amount: Some(Money::new(Decimal::new(amount_cents, 2), "USD")),
    }
}

/// `uri` with the app proxy signature Shopify would append for
/// [`TEST_APP_SECRET`].
///
/// # Panics
///
/// Panics if the query can't be signed.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn signed_uri(uri: &str) -> String {
    let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
    let signature = sign_query(query, TEST_APP_SECRET).unwrap();
    if query.is_empty() {
        format!("{path}?signature={signature}")
    } else {
        format!("{path}?{query}&signature={signature}")
    }
}

/// Signed `POST uri` with a JSON body, as forwarded by the app proxy.
#[must_use]
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    post_json_unsigned(&signed_uri(uri), body)
}

/// `POST uri` with a JSON body and the query left exactly as given.
///
/// # Panics
///
/// Panics if the request can't be built.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn post_json_unsigned(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Signed `GET uri`.
///
/// # Panics
///
/// Panics if the request can't be built.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn signed_get(uri: &str) -> Request<Body> {
    Request::get(signed_uri(uri)).body(Body::empty()).unwrap()
}

/// Send `request` and return status plus JSON body (`Null` for non-JSON).
///
/// # Panics
///
/// Panics if the router or body read fails.
#[allow(clippy::unwrap_used)]
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
