//! App proxy redemption endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use gift_redeem_core::{CustomerId, ResolutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::AppError;
use crate::services::redemption::ResolutionRequest;
use crate::state::AppState;

/// Query parameters Shopify appends to app proxy requests.
#[derive(Debug, Default, Deserialize)]
pub struct ProxyParams {
    /// Numeric ID of the logged-in customer; empty when nobody is logged in.
    pub logged_in_customer_id: Option<String>,
}

/// JSON body posted by the storefront widget.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemBody {
    /// Code as the shopper typed it.
    pub code: Option<String>,
    /// Cart total in minor currency units.
    pub cart_total: Option<Number>,
}

/// Liveness payload for `GET /api`.
#[derive(Debug, Serialize)]
pub struct ProxyStatus {
    message: &'static str,
}

/// `GET /api`
pub async fn status() -> Json<ProxyStatus> {
    Json(ProxyStatus {
        message: "Storefront API proxy is active",
    })
}

/// `POST /api`
///
/// # Errors
///
/// 400 for a malformed body or missing code, 500 when the standard lookup
/// fails upstream.
pub async fn redeem(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
    body: Result<Json<RedeemBody>, JsonRejection>,
) -> Result<Json<ResolutionResult>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let request = ResolutionRequest {
        code: body.code,
        cart_total: body.cart_total.as_ref().map_or(0, minor_units),
        customer: CustomerId::from_proxy_param(params.logged_in_customer_id.as_deref()),
    };

    let resolution = state.resolver().resolve(&request).await?;
    Ok(Json(resolution.result))
}

/// Cart total as whole minor units. Fractional values are rounded; negative
/// totals are clamped later by the amount math.
#[allow(clippy::cast_possible_truncation)]
fn minor_units(total: &Number) -> i64 {
    total
        .as_i64()
        .or_else(|| total.as_f64().map(|f| f.round() as i64))
        .unwrap_or(0)
}
