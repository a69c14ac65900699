//! Code resolution: gift card redemption with standard discount fallback.
//!
//! # Flow
//!
//! 1. Canonicalize the code; reject blank codes.
//! 2. Fetch the recent gift card snapshot (a failure degrades to an empty one).
//! 3. Match the code against the snapshot, honoring customer binding.
//! 4. On a match, provision a discount code for the applied amount.
//! 5. Otherwise, look the code up as a standard code discount.
//!
//! The gift path never falls through to the standard lookup.

mod backend;
mod lookup;
#[cfg(any(test, feature = "test-util"))]
mod memory;
mod provisioner;

use std::sync::Arc;

use gift_redeem_core::redemption::{GiftMatcher, applied_amount};
use gift_redeem_core::{CanonicalCode, CustomerId, ResolutionOutcome, ResolutionResult};
use thiserror::Error;
use tracing::instrument;

use crate::config::RedemptionConfig;

pub use backend::{
    BackendError, CreateDiscountInput, CreateOutcome, RedemptionBackend, UserError,
};
pub use lookup::lookup_standard;
#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryBackend;
pub use provisioner::{ProvisionError, Provisioned, Provisioner};

/// Message shown when provisioning fails for a reason the shopper can't fix.
pub const SYSTEM_ERROR_MESSAGE: &str = "System error creating discount";

/// Message returned with HTTP 500 when the standard lookup fails.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Server error querying code";

/// Request-level failures that don't produce a normal envelope.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request carried no usable code.
    #[error("No code provided")]
    MissingCode,

    /// The standard code lookup failed upstream.
    #[error("{UPSTREAM_ERROR_MESSAGE}")]
    Upstream(#[source] BackendError),
}

/// One code resolution as received from the storefront.
#[derive(Debug, Clone, Default)]
pub struct ResolutionRequest {
    /// Code exactly as the shopper entered it.
    pub code: Option<String>,
    /// Cart total in minor currency units.
    pub cart_total: i64,
    /// Logged-in customer, if any.
    pub customer: Option<CustomerId>,
}

/// Envelope plus the terminal state that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Response body for the storefront.
    pub result: ResolutionResult,
    /// Terminal state, used for logs and status codes.
    pub outcome: ResolutionOutcome,
}

/// Resolves shopper codes against a [`RedemptionBackend`].
#[derive(Clone)]
pub struct Resolver {
    backend: Arc<dyn RedemptionBackend>,
    matcher: GiftMatcher,
    provisioner: Provisioner,
    snapshot_size: i64,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("matcher", &self.matcher)
            .field("provisioner", &self.provisioner)
            .field("snapshot_size", &self.snapshot_size)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create a resolver over `backend` with the given policy.
    #[must_use]
    pub fn new(backend: Arc<dyn RedemptionBackend>, config: &RedemptionConfig) -> Self {
        Self {
            backend,
            matcher: GiftMatcher::new(&config.gift_prefix),
            provisioner: Provisioner::from_config(config),
            snapshot_size: config.snapshot_size,
        }
    }

    /// The backend this resolver talks to.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn RedemptionBackend> {
        &self.backend
    }

    /// Resolve one code.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingCode`] for a blank code and
    /// [`ResolveError::Upstream`] when the standard lookup fails. Every other
    /// terminal state is an `Ok` envelope.
    #[instrument(
        name = "resolve_code",
        skip_all,
        fields(
            code = tracing::field::Empty,
            has_customer = request.customer.is_some(),
            outcome = tracing::field::Empty,
        )
    )]
    pub async fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution, ResolveError> {
        let span = tracing::Span::current();
        let result = self.resolve_inner(request).await;

        let outcome = match &result {
            Ok(resolution) => resolution.outcome,
            Err(ResolveError::MissingCode) => ResolutionOutcome::ValidationFailed,
            Err(ResolveError::Upstream(_)) => ResolutionOutcome::UpstreamError,
        };
        span.record("outcome", outcome.as_str());
        tracing::info!(%outcome, "Code resolved");

        result
    }

    async fn resolve_inner(&self, request: &ResolutionRequest) -> Result<Resolution, ResolveError> {
        let raw_code = request.code.as_deref().unwrap_or_default();
        let code = CanonicalCode::new(raw_code);
        if code.is_empty() {
            return Err(ResolveError::MissingCode);
        }
        tracing::Span::current().record("code", code.as_str());

        let snapshot = match self.backend.fetch_gift_cards(self.snapshot_size).await {
            Ok(cards) => cards,
            Err(e) => {
                tracing::warn!(error = %e, "Gift card snapshot fetch failed; continuing without gift cards");
                Vec::new()
            }
        };

        if let Some(found) = self
            .matcher
            .find(&code, &snapshot, request.customer.as_ref())
        {
            let card = found.card;
            let amount = applied_amount(card.balance.amount, request.cart_total);
            tracing::debug!(
                gift_card_id = %card.id,
                match_kind = ?found.kind,
                amount = %amount,
                "Gift card matched"
            );

            let resolution = match self
                .provisioner
                .provision(self.backend.as_ref(), &code, card, amount)
                .await
            {
                Ok(provisioned) => Resolution {
                    result: ResolutionResult::gift(amount, &card.balance, provisioned.code),
                    outcome: provisioned.outcome,
                },
                Err(ProvisionError::Rejected(message)) => Resolution {
                    result: ResolutionResult::invalid(message),
                    outcome: ResolutionOutcome::ProvisionFailed,
                },
                Err(ProvisionError::Backend(e)) => {
                    tracing::error!(
                        error = %e,
                        gift_card_id = %card.id,
                        "Failed to provision gift card discount"
                    );
                    Resolution {
                        result: ResolutionResult::invalid(SYSTEM_ERROR_MESSAGE),
                        outcome: ResolutionOutcome::ProvisionFailed,
                    }
                }
            };
            return Ok(resolution);
        }

        lookup_standard(self.backend.as_ref(), &code, raw_code)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Standard code lookup failed");
                ResolveError::Upstream(e)
            })
    }
}
