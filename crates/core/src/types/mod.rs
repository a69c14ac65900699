//! Core types for Gift Redeem.
//!
//! This module provides type-safe wrappers for the domain concepts the
//! resolver works with.

pub mod code;
pub mod discount;
pub mod gift_card;
pub mod id;
pub mod money;
pub mod resolution;

pub use code::CanonicalCode;
pub use discount::{CodeDiscount, DiscountDetails, DiscountKind, DiscountStatus};
pub use gift_card::GiftInstrument;
pub use id::{CustomerId, gid_tail};
pub use money::Money;
pub use resolution::{ResolutionOutcome, ResolutionResult, ResolutionType};
