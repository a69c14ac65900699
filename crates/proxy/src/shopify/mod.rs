//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! The proxy holds an Admin API access token. It only needs the
//! `read_gift_cards`, `read_discounts` and `write_discounts` scopes; grant
//! nothing more.
//!
//! # Architecture
//!
//! - `graphql_client::GraphQLQuery` describes each operation
//! - Requests are sent with `reqwest` directly
//! - Every call is attempted once; timeouts come from the HTTP client
//!
//! # Example
//!
//! ```rust,ignore
//! use gift_redeem_proxy::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//! let cards = client.get_gift_cards(50).await?;
//! let discount = client.find_code_discount("SAVE10").await?;
//! ```

mod admin;

pub use admin::{
    AdminClient, DiscountCreateInput, DiscountCreateOutcome, DiscountUserError, queries,
};

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed (including timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Unexpected HTTP status from the Admin API.
    #[error("Unexpected status {0}")]
    Status(u16),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
