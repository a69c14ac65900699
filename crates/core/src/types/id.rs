//! Shopify global IDs and customer identifiers.
//!
//! Shopify's Admin API returns global IDs like `gid://shopify/Customer/123`,
//! while the app proxy hands us only the trailing `123`. These helpers bridge
//! the two forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Returns the trailing component of a Shopify global ID.
///
/// For `gid://shopify/Customer/123` this is `"123"`. Strings without a `/`
/// are returned unchanged.
///
/// ```
/// use gift_redeem_core::gid_tail;
///
/// assert_eq!(gid_tail("gid://shopify/Customer/123"), "123");
/// assert_eq!(gid_tail("123"), "123");
/// ```
#[must_use]
pub fn gid_tail(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

/// The authenticated customer making a request, as supplied by the app proxy.
///
/// Holds the bare identifier (`"123"`), not the full global ID. Construct it
/// with [`CustomerId::from_proxy_param`], which treats an empty parameter as
/// "not logged in".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Create a customer ID from a bare identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Interpret the `logged_in_customer_id` app proxy parameter.
    ///
    /// Shopify sends the parameter with an empty value when the shopper is
    /// anonymous, so blank values map to `None`.
    #[must_use]
    pub fn from_proxy_param(param: Option<&str>) -> Option<Self> {
        param
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(Self::new)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gid_tail() {
        assert_eq!(gid_tail("gid://shopify/Customer/8812345"), "8812345");
        assert_eq!(gid_tail("gid://shopify/GiftCard/1"), "1");
        assert_eq!(gid_tail("plain"), "plain");
        assert_eq!(gid_tail(""), "");
    }

    #[test]
    fn test_gid_tail_trailing_slash() {
        assert_eq!(gid_tail("gid://shopify/Customer/"), "");
    }

    #[test]
    fn test_from_proxy_param() {
        assert_eq!(
            CustomerId::from_proxy_param(Some("42")),
            Some(CustomerId::new("42"))
        );
        assert_eq!(CustomerId::from_proxy_param(Some("")), None);
        assert_eq!(CustomerId::from_proxy_param(Some("  ")), None);
        assert_eq!(CustomerId::from_proxy_param(None), None);
    }
}
