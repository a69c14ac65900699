//! Gift card to customer binding.

use crate::types::{CustomerId, GiftInstrument};

/// Whether `customer` may redeem `card`.
///
/// Cards issued to a customer can only be redeemed by that customer: the
/// trailing component of the card's customer GID must equal the proxy's
/// `logged_in_customer_id` exactly. Unbound cards can be redeemed by anyone,
/// including anonymous shoppers.
#[must_use]
pub fn customer_may_redeem(card: &GiftInstrument, customer: Option<&CustomerId>) -> bool {
    match card.bound_customer() {
        None => true,
        Some(bound) => customer.is_some_and(|c| c.as_str() == bound),
    }
}
