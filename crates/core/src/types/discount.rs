//! Code discount types.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Discount status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountStatus {
    /// Discount is active.
    Active,
    /// Discount is expired.
    Expired,
    /// Discount is scheduled.
    Scheduled,
    /// A status this crate doesn't know yet; never applied.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for DiscountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Kind of code discount entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Amount or percentage off.
    Basic,
    /// Free shipping.
    FreeShipping,
    /// Buy X Get Y.
    BuyXGetY,
    /// Discount implemented by a Shopify Function.
    App,
}

/// A code discount entry found by exact code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDiscount {
    /// Discount node ID (e.g., `gid://shopify/DiscountCodeNode/123`).
    pub id: String,
    /// The code that was looked up.
    pub code: String,
    /// Internal discount title.
    pub title: Option<String>,
    /// Status, if the entry kind reports one.
    pub status: Option<DiscountStatus>,
    /// Entry kind.
    pub kind: DiscountKind,
    /// Fixed amount off, for basic discounts with a fixed value.
    pub amount: Option<Money>,
}

impl CodeDiscount {
    /// Whether the entry can be applied at checkout.
    ///
    /// Entries without a status are considered active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_none_or(|s| s == DiscountStatus::Active)
    }

    /// Details passed through to the shopper on a successful lookup.
    #[must_use]
    pub fn details(&self) -> DiscountDetails {
        DiscountDetails {
            id: self.id.clone(),
            title: self.title.clone(),
            status: self.status,
            kind: self.kind,
        }
    }
}

/// Standard discount details returned in the resolution envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountDetails {
    /// Discount node ID.
    pub id: String,
    /// Internal discount title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Status as reported by Shopify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DiscountStatus>,
    /// Entry kind.
    pub kind: DiscountKind,
}
