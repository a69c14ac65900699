//! The slice of the Shopify Admin API the resolver depends on.

use async_trait::async_trait;
use gift_redeem_core::{CodeDiscount, GiftInstrument};

use crate::shopify::{AdminClient, AdminShopifyError};

pub use crate::shopify::{
    DiscountCreateInput as CreateDiscountInput, DiscountCreateOutcome as CreateOutcome,
    DiscountUserError as UserError,
};

/// Transport-level failure of a backend call.
pub type BackendError = AdminShopifyError;

/// External platform operations used during a resolution.
///
/// Each call is made at most once per request. Implementations must be
/// shareable across requests.
#[async_trait]
pub trait RedemptionBackend: Send + Sync {
    /// Most recently created enabled gift cards, newest first.
    async fn fetch_gift_cards(&self, limit: i64) -> Result<Vec<GiftInstrument>, BackendError>;

    /// The code discount using exactly `code`, of any discount type.
    async fn find_code_discount(&self, code: &str) -> Result<Option<CodeDiscount>, BackendError>;

    /// Create a fixed-amount basic code discount.
    async fn create_code_discount(
        &self,
        input: &CreateDiscountInput,
    ) -> Result<CreateOutcome, BackendError>;
}

#[async_trait]
impl RedemptionBackend for AdminClient {
    async fn fetch_gift_cards(&self, limit: i64) -> Result<Vec<GiftInstrument>, BackendError> {
        self.get_gift_cards(limit).await
    }

    async fn find_code_discount(&self, code: &str) -> Result<Option<CodeDiscount>, BackendError> {
        Self::find_code_discount(self, code).await
    }

    async fn create_code_discount(
        &self,
        input: &CreateDiscountInput,
    ) -> Result<CreateOutcome, BackendError> {
        Self::create_code_discount(self, input).await
    }
}
