//! Code discount operations for the Admin API.

use chrono::{DateTime, SecondsFormat, Utc};
use gift_redeem_core::{CodeDiscount, DiscountKind, Money};
use rust_decimal::Decimal;
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError, GraphQLError,
    queries::{
        CodeDiscountByCode, DiscountCodeBasicCreate, code_discount_by_code,
        discount_code_basic_create,
    },
};

/// Shopify user error code for a discount code that already exists.
const TAKEN: &str = "TAKEN";

/// Input for creating a fixed-amount basic code discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCreateInput {
    /// Internal discount title.
    pub title: String,
    /// Customer-facing discount code.
    pub code: String,
    /// When the discount becomes active.
    pub starts_at: DateTime<Utc>,
    /// When the discount expires.
    pub ends_at: DateTime<Utc>,
    /// Fixed amount taken off the order.
    pub amount: Decimal,
    /// Whether each customer may use the code only once.
    pub applies_once_per_customer: bool,
}

/// Field-level error returned by a discount mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountUserError {
    /// Path to the offending input field.
    pub field: Vec<String>,
    /// Error message.
    pub message: String,
    /// Shopify `DiscountErrorCode`, if provided.
    pub code: Option<String>,
}

impl DiscountUserError {
    /// Whether the error reports that the code is already in use.
    #[must_use]
    pub fn is_taken(&self) -> bool {
        self.code.as_deref() == Some(TAKEN)
    }
}

/// Result of a create mutation that reached Shopify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountCreateOutcome {
    /// The discount was created.
    Created {
        /// Discount node ID.
        id: String,
    },
    /// Shopify rejected the input.
    Rejected(Vec<DiscountUserError>),
}

impl AdminClient {
    /// Look up a code discount by its redeemable code.
    ///
    /// Covers every code discount type. Returns `Ok(None)` when no discount
    /// uses the code.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn find_code_discount(
        &self,
        code: &str,
    ) -> Result<Option<CodeDiscount>, AdminShopifyError> {
        let variables = code_discount_by_code::Variables {
            code: code.to_string(),
        };

        let response = self.execute::<CodeDiscountByCode>(variables).await?;

        Ok(response
            .code_discount_node_by_code
            .map(|node| convert_code_discount(code, node)))
    }

    /// Create a fixed-amount basic code discount for all customers and items.
    ///
    /// User errors are returned as [`DiscountCreateOutcome::Rejected`] rather
    /// than as an `Err`, so callers can react to specific codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_code_discount(
        &self,
        input: &DiscountCreateInput,
    ) -> Result<DiscountCreateOutcome, AdminShopifyError> {
        use discount_code_basic_create::{
            DiscountAmountInput, DiscountBuyerSelection, DiscountCodeBasicInput,
            DiscountContextInput, DiscountCustomerGetsInput, DiscountCustomerGetsValueInput,
            DiscountItemsInput, Variables,
        };

        let variables = Variables {
            basic_code_discount: DiscountCodeBasicInput {
                title: input.title.clone(),
                code: input.code.clone(),
                starts_at: input.starts_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                ends_at: input.ends_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                context: DiscountContextInput {
                    all: DiscountBuyerSelection::All,
                },
                customer_gets: DiscountCustomerGetsInput {
                    value: DiscountCustomerGetsValueInput {
                        discount_amount: DiscountAmountInput {
                            amount: format!("{:.2}", input.amount),
                            applies_on_each_item: false,
                        },
                    },
                    items: DiscountItemsInput { all: true },
                },
                applies_once_per_customer: input.applies_once_per_customer,
            },
        };

        let response = self.execute::<DiscountCodeBasicCreate>(variables).await?;

        let Some(payload) = response.discount_code_basic_create else {
            return Err(AdminShopifyError::GraphQL(vec![GraphQLError::message(
                "No payload returned from discountCodeBasicCreate",
            )]));
        };

        if !payload.user_errors.is_empty() {
            let errors = payload
                .user_errors
                .into_iter()
                .map(|e| DiscountUserError {
                    field: e.field.unwrap_or_default(),
                    message: e.message,
                    code: e.code,
                })
                .collect();
            return Ok(DiscountCreateOutcome::Rejected(errors));
        }

        payload.code_discount_node.map_or_else(
            || {
                Err(AdminShopifyError::GraphQL(vec![GraphQLError::message(
                    "No discount returned from create",
                )]))
            },
            |node| Ok(DiscountCreateOutcome::Created { id: node.id }),
        )
    }
}

fn convert_code_discount(
    code: &str,
    node: code_discount_by_code::CodeDiscountNode,
) -> CodeDiscount {
    let discount = node.code_discount;
    let kind = match discount.typename.as_str() {
        "DiscountCodeFreeShipping" => DiscountKind::FreeShipping,
        "DiscountCodeBxgy" => DiscountKind::BuyXGetY,
        "DiscountCodeApp" => DiscountKind::App,
        _ => DiscountKind::Basic,
    };
    let amount = discount
        .customer_gets
        .and_then(|gets| gets.value.amount)
        .map(|money| Money::new(money.amount, money.currency_code));

    CodeDiscount {
        id: node.id,
        code: code.to_string(),
        title: discount.title,
        status: discount.status,
        kind,
        amount,
    }
}
