//! Gift card (gift instrument) snapshot type.

use serde::{Deserialize, Serialize};

use super::id::gid_tail;
use super::money::Money;

/// A gift card as seen in one request's snapshot.
///
/// Gift cards are owned by Shopify. The resolver reads a bounded, recent
/// snapshot per request and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftInstrument {
    /// Shopify gift card ID (e.g., `gid://shopify/GiftCard/123`).
    pub id: String,
    /// Last characters of the gift card code, used for display and matching.
    pub last_characters: String,
    /// Remaining balance.
    pub balance: Money,
    /// Whether the gift card can be spent.
    pub enabled: bool,
    /// Customer the card is issued to (e.g., `gid://shopify/Customer/456`).
    pub customer_id: Option<String>,
}

impl GiftInstrument {
    /// The uppercased display tag, or `None` if the card has no usable tag.
    #[must_use]
    pub fn display_tag(&self) -> Option<String> {
        let tag = self.last_characters.trim();
        (!tag.is_empty()).then(|| tag.to_uppercase())
    }

    /// Trailing component of the bound customer's global ID, if bound.
    #[must_use]
    pub fn bound_customer(&self) -> Option<&str> {
        self.customer_id.as_deref().map(gid_tail)
    }
}
