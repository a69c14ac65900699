//! Gift Redeem Core - Shared types and pure resolution logic.
//!
//! This crate provides the types used across all Gift Redeem components:
//! - `proxy` - Shopify app proxy endpoint that resolves shopper codes
//! - `cli` - Command-line tools for inspecting gift cards and resolving codes
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything that talks to Shopify lives in the proxy crate.
//!
//! # Modules
//!
//! - [`types`] - Canonical codes, money, Shopify IDs, gift cards, discounts, and
//!   the resolution envelope
//! - [`redemption`] - Gift card matching, customer binding, and amount math

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod redemption;
pub mod types;

pub use types::*;
