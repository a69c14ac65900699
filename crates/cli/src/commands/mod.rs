//! CLI command implementations.

pub mod gift_cards;
pub mod resolve;

use gift_redeem_proxy::config::ConfigError;
use gift_redeem_proxy::services::ResolveError;
use gift_redeem_proxy::shopify::AdminShopifyError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shopify Admin API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Resolution ended without an envelope.
    #[error("Resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `--limit` outside what Shopify accepts.
    #[error("Invalid limit {0}: must be between 1 and 250")]
    InvalidLimit(i64),
}
