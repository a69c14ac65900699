//! Business logic services for the proxy.
//!
//! # Services
//!
//! - `redemption` - Gift card and discount code resolution

pub mod redemption;

pub use redemption::{Resolution, ResolutionRequest, ResolveError, Resolver};
