//! Standard (non gift card) code discount lookup.

use gift_redeem_core::{CanonicalCode, ResolutionOutcome, ResolutionResult};

use super::Resolution;
use super::backend::{BackendError, RedemptionBackend};

pub const INACTIVE_MESSAGE: &str = "This code is no longer active";

/// Resolve `code` against the store's code discounts.
///
/// `raw_code` is what the shopper typed and is quoted back in the not-found
/// message.
///
/// # Errors
///
/// Returns the backend error if the lookup fails.
pub async fn lookup_standard(
    backend: &dyn RedemptionBackend,
    code: &CanonicalCode,
    raw_code: &str,
) -> Result<Resolution, BackendError> {
    let Some(discount) = backend.find_code_discount(code.as_str()).await? else {
        return Ok(Resolution {
            result: ResolutionResult::invalid(format!("Code \"{raw_code}\" not found or invalid")),
            outcome: ResolutionOutcome::NotFound,
        });
    };

    if !discount.is_active() {
        tracing::debug!(
            discount_id = %discount.id,
            status = ?discount.status,
            "Code discount is not active"
        );
        return Ok(Resolution {
            result: ResolutionResult::invalid(INACTIVE_MESSAGE),
            outcome: ResolutionOutcome::Inactive,
        });
    }

    Ok(Resolution {
        result: ResolutionResult::standard(discount.details()),
        outcome: ResolutionOutcome::Active,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gift_redeem_core::{CodeDiscount, DiscountKind, DiscountStatus, ResolutionType};

    use super::*;
    use crate::services::redemption::memory::InMemoryBackend;

    fn discount(code: &str, status: Option<DiscountStatus>) -> CodeDiscount {
        CodeDiscount {
            id: "gid://shopify/DiscountCodeNode/10".to_string(),
            code: code.to_string(),
            title: Some("Ten off".to_string()),
            status,
            kind: DiscountKind::Basic,
            amount: None,
        }
    }

    #[tokio::test]
    async fn test_active_code_is_valid() {
        let backend = InMemoryBackend::new().with_discount(discount("SAVE10", Some(DiscountStatus::Active)));

        let resolution = lookup_standard(&backend, &CanonicalCode::new("save 10"), "save 10")
            .await
            .unwrap();

        assert_eq!(resolution.outcome, ResolutionOutcome::Active);
        assert!(resolution.result.valid);
        assert_eq!(resolution.result.kind, Some(ResolutionType::StandardDiscount));
        let details = resolution.result.details.unwrap();
        assert_eq!(details.title.as_deref(), Some("Ten off"));
        assert_eq!(details.status, Some(DiscountStatus::Active));
    }

    #[tokio::test]
    async fn test_status_less_code_is_valid() {
        let backend = InMemoryBackend::new().with_discount(discount("APPCODE", None));
        let resolution = lookup_standard(&backend, &CanonicalCode::new("APPCODE"), "APPCODE")
            .await
            .unwrap();
        assert!(resolution.result.valid);
    }

    #[tokio::test]
    async fn test_expired_and_scheduled_are_inactive() {
        for status in [DiscountStatus::Expired, DiscountStatus::Scheduled, DiscountStatus::Unknown] {
            let backend = InMemoryBackend::new().with_discount(discount("OLD", Some(status)));
            let resolution = lookup_standard(&backend, &CanonicalCode::new("old"), "old")
                .await
                .unwrap();
            assert_eq!(resolution.outcome, ResolutionOutcome::Inactive);
            assert_eq!(resolution.result.message.as_deref(), Some(INACTIVE_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_unknown_code_quotes_raw_input() {
        let backend = InMemoryBackend::new();
        let resolution = lookup_standard(&backend, &CanonicalCode::new("nope 1"), "nope 1")
            .await
            .unwrap();
        assert_eq!(resolution.outcome, ResolutionOutcome::NotFound);
        assert_eq!(
            resolution.result.message.as_deref(),
            Some("Code \"nope 1\" not found or invalid")
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let backend = InMemoryBackend::new();
        backend.fail_lookup(true);
        assert!(
            lookup_standard(&backend, &CanonicalCode::new("X"), "X")
                .await
                .is_err()
        );
    }
}
