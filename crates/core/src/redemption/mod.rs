//! Pure gift card redemption logic.
//!
//! Everything here works over an already fetched snapshot, so it can be
//! exercised without Shopify.

pub mod amount;
pub mod binding;
pub mod matcher;

pub use amount::applied_amount;
pub use binding::customer_may_redeem;
pub use matcher::{DEFAULT_GIFT_PREFIX, GiftMatch, GiftMatcher, MatchKind};
