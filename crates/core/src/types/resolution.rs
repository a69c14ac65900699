//! The resolution envelope returned to the storefront.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::discount::DiscountDetails;
use super::money::Money;

/// What a resolved code turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionType {
    /// A gift card, redeemed through a provisioned discount code.
    GiftInstrument,
    /// A regular Shopify code discount.
    StandardDiscount,
}

/// Terminal state of one resolution.
///
/// ```text
/// Received -> ValidationFailed
///          -> GiftMatched -> Reused | Created | ProvisionFailed
///          -> NoGiftMatch -> Active | Inactive | NotFound | UpstreamError
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The request carried no usable code.
    ValidationFailed,
    /// A gift card matched and an existing discount code was reused.
    Reused,
    /// A gift card matched and a new discount code was created.
    Created,
    /// A gift card matched but no discount code could be provisioned.
    ProvisionFailed,
    /// A standard code discount was found and is active.
    Active,
    /// A standard code discount was found but is not active.
    Inactive,
    /// Neither a gift card nor a code discount matched.
    NotFound,
    /// The standard code lookup failed upstream.
    UpstreamError,
}

impl ResolutionOutcome {
    /// Returns the outcome name as used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::Reused => "reused",
            Self::Created => "created",
            Self::ProvisionFailed => "provision_failed",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::NotFound => "not_found",
            Self::UpstreamError => "upstream_error",
        }
    }
}

impl std::fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response envelope for a code resolution.
///
/// Serialized in camelCase with absent fields omitted. Amounts are emitted as
/// JSON numbers, which is what the storefront widget expects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// Whether the code can be applied.
    pub valid: bool,
    /// What the code resolved to.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResolutionType>,
    /// Amount applied from the gift card.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub applied_amount: Option<Decimal>,
    /// Gift card balance before this redemption.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_balance: Option<Decimal>,
    /// Gift card balance left after this redemption.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_balance: Option<Decimal>,
    /// Discount code the checkout should apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    /// Currency of the amounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Standard discount details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DiscountDetails>,
    /// Human-readable message for the shopper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResolutionResult {
    /// A gift card redemption through `discount_code`.
    #[must_use]
    pub fn gift(applied: Decimal, balance: &Money, discount_code: String) -> Self {
        Self {
            valid: true,
            kind: Some(ResolutionType::GiftInstrument),
            applied_amount: Some(applied),
            total_balance: Some(balance.amount),
            new_balance: Some(balance.amount - applied),
            discount_code: Some(discount_code),
            currency: Some(balance.currency_code.clone()),
            details: None,
            message: Some(format!(
                "Applied {} {applied:.2} from your gift card.",
                balance.currency_code
            )),
        }
    }

    /// A valid standard code discount.
    #[must_use]
    pub fn standard(details: DiscountDetails) -> Self {
        Self {
            valid: true,
            kind: Some(ResolutionType::StandardDiscount),
            details: Some(details),
            ..Self::default()
        }
    }

    /// An invalid result carrying only a message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::discount::{DiscountKind, DiscountStatus};

    #[test]
    fn test_gift_envelope() {
        let balance = Money::new(Decimal::new(3000, 2), "USD");
        let result = ResolutionResult::gift(Decimal::new(1250, 2), &balance, "GIFT-AB12".into());

        assert!(result.valid);
        assert_eq!(result.new_balance, Some(Decimal::new(1750, 2)));
        assert_eq!(
            result.message.as_deref(),
            Some("Applied USD 12.50 from your gift card.")
        );

        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["type"], "gift_instrument");
        assert_eq!(json["appliedAmount"], 12.5);
        assert_eq!(json["totalBalance"], 30.0);
        assert_eq!(json["newBalance"], 17.5);
        assert_eq!(json["discountCode"], "GIFT-AB12");
        assert_eq!(json["currency"], "USD");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_standard_envelope() {
        let result = ResolutionResult::standard(DiscountDetails {
            id: "gid://shopify/DiscountCodeNode/9".to_string(),
            title: Some("Ten off".to_string()),
            status: Some(DiscountStatus::Active),
            kind: DiscountKind::Basic,
        });

        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["valid"], true);
        assert_eq!(json["type"], "standard_discount");
        assert_eq!(json["details"]["title"], "Ten off");
        assert!(json.get("appliedAmount").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_invalid_envelope_omits_absent_fields() {
        let json = serde_json::to_value(ResolutionResult::invalid("nope")).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "valid": false, "message": "nope" }));
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(ResolutionOutcome::ProvisionFailed.to_string(), "provision_failed");
        assert_eq!(ResolutionOutcome::NotFound.as_str(), "not_found");
    }
}
