//! Get-or-create of the discount code that carries a gift card amount.

use chrono::Utc;
use gift_redeem_core::{CanonicalCode, CodeDiscount, DiscountKind, GiftInstrument, ResolutionOutcome};
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use thiserror::Error;

use super::backend::{BackendError, CreateDiscountInput, CreateOutcome, RedemptionBackend, UserError};
use crate::config::{CodeStrategy, RedemptionConfig, ReusePolicy};

/// Prefix of ephemeral codes.
const EPHEMERAL_PREFIX: &str = "GC-";
const EPHEMERAL_LEN: usize = 6;
const EPHEMERAL_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Provisioned codes start this far in the past to absorb clock drift.
const START_SKEW_SECS: i64 = 60;
const FALLBACK_REJECTION: &str = "Shopify rejected the discount creation.";
/// Shown when the code the gift card would use belongs to another discount.
const CODE_IN_USE_MESSAGE: &str = "This code is already used by another discount";

/// Why no discount code could be provisioned.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Shopify refused the discount input; carries the message to show.
    #[error("discount creation rejected: {0}")]
    Rejected(String),

    /// The lookup or create call failed.
    #[error("discount backend error: {0}")]
    Backend(#[from] BackendError),
}

/// A discount code ready for checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    /// Code the checkout should apply.
    pub code: String,
    /// `Reused` or `Created`.
    pub outcome: ResolutionOutcome,
}

/// Provisions short-lived fixed-amount discount codes for gift card redemptions.
#[derive(Debug, Clone)]
pub struct Provisioner {
    strategy: CodeStrategy,
    reuse: ReusePolicy,
    ttl: chrono::Duration,
}

impl Provisioner {
    /// Build a provisioner from the redemption policy.
    #[must_use]
    pub const fn from_config(config: &RedemptionConfig) -> Self {
        Self {
            strategy: config.code_strategy,
            reuse: config.reuse_policy,
            ttl: config.code_ttl,
        }
    }

    /// Return a discount code worth `amount` for `card`.
    ///
    /// With the deterministic strategy the shopper's canonical code is used,
    /// so repeated redemptions find and reuse the same entry. A `TAKEN`
    /// rejection means a concurrent request created it first, and that entry
    /// is reused as well.
    ///
    /// Only an active fixed-amount entry titled for this card is reused. When
    /// the code belongs to this card but is no longer active, a fresh
    /// ephemeral code is issued instead. When it belongs to any other
    /// discount the redemption is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Rejected`] when Shopify refuses the input or
    /// the code is held by an unrelated discount, and
    /// [`ProvisionError::Backend`] when a call fails.
    pub async fn provision(
        &self,
        backend: &dyn RedemptionBackend,
        request_code: &CanonicalCode,
        card: &GiftInstrument,
        amount: Decimal,
    ) -> Result<Provisioned, ProvisionError> {
        let mut code = match self.strategy {
            CodeStrategy::Deterministic => request_code.as_str().to_string(),
            CodeStrategy::Ephemeral => ephemeral_code(),
        };

        match find_existing(backend, &code, card, amount).await? {
            Existing::Absent => {}
            Existing::Reusable(existing) => return Ok(existing),
            Existing::Stale => {
                code = ephemeral_code();
                tracing::info!(
                    gift_card_id = %card.id,
                    replacement = %code,
                    "Gift card discount code is no longer active; issuing a fresh code"
                );
            }
            Existing::Foreign => return Err(ProvisionError::Rejected(CODE_IN_USE_MESSAGE.to_string())),
        }

        let input = self.create_input(card, &code, amount);
        match backend.create_code_discount(&input).await? {
            CreateOutcome::Created { id } => {
                tracing::info!(
                    discount_id = %id,
                    gift_card_id = %card.id,
                    amount = %amount,
                    ends_at = %input.ends_at,
                    "Created gift card discount code"
                );
                Ok(Provisioned {
                    code,
                    outcome: ResolutionOutcome::Created,
                })
            }
            CreateOutcome::Rejected(errors) => {
                if errors.iter().any(UserError::is_taken) {
                    tracing::info!("Discount code taken by a concurrent request; reusing it");
                    if let Existing::Reusable(existing) =
                        find_existing(backend, &code, card, amount).await?
                    {
                        return Ok(existing);
                    }
                }
                Err(rejection(&errors))
            }
        }
    }

    fn create_input(&self, card: &GiftInstrument, code: &str, amount: Decimal) -> CreateDiscountInput {
        let now = Utc::now();

        CreateDiscountInput {
            title: gift_title(card),
            code: code.to_string(),
            starts_at: now - chrono::Duration::seconds(START_SKEW_SECS),
            ends_at: now + self.ttl,
            amount,
            applies_once_per_customer: self.reuse.applies_once_per_customer(),
        }
    }
}

/// What already holds a code the provisioner wants to use.
#[derive(Debug)]
enum Existing {
    /// Nothing uses the code.
    Absent,
    /// An active gift entry for this card.
    Reusable(Provisioned),
    /// A gift entry for this card that can no longer be applied.
    Stale,
    /// Some other discount.
    Foreign,
}

async fn find_existing(
    backend: &dyn RedemptionBackend,
    code: &str,
    card: &GiftInstrument,
    amount: Decimal,
) -> Result<Existing, BackendError> {
    let Some(existing) = backend.find_code_discount(code).await? else {
        return Ok(Existing::Absent);
    };

    let Some(existing_amount) = existing
        .amount
        .as_ref()
        .filter(|_| is_gift_entry(&existing, card))
    else {
        tracing::warn!(
            discount_id = %existing.id,
            kind = ?existing.kind,
            title = ?existing.title,
            "Code is held by a discount that was not issued for this gift card"
        );
        return Ok(Existing::Foreign);
    };

    if !existing.is_active() {
        tracing::debug!(discount_id = %existing.id, status = ?existing.status, "Gift card discount code is stale");
        return Ok(Existing::Stale);
    }

    if existing_amount.amount != amount {
        tracing::warn!(
            discount_id = %existing.id,
            existing_amount = %existing_amount.amount,
            computed_amount = %amount,
            "Reusing discount code whose amount differs from the computed amount"
        );
    }

    Ok(Existing::Reusable(Provisioned {
        code: code.to_string(),
        outcome: ResolutionOutcome::Reused,
    }))
}

/// A fixed-amount basic discount carrying the title this provisioner gives
/// `card`'s codes.
fn is_gift_entry(entry: &CodeDiscount, card: &GiftInstrument) -> bool {
    entry.kind == DiscountKind::Basic
        && entry.amount.is_some()
        && entry.title.as_deref() == Some(gift_title(card).as_str())
}

fn gift_title(card: &GiftInstrument) -> String {
    let tag = card
        .display_tag()
        .unwrap_or_else(|| card.last_characters.clone());
    format!("Gift Card - {tag}")
}

fn rejection(errors: &[UserError]) -> ProvisionError {
    let message = errors
        .first()
        .map_or_else(|| FALLBACK_REJECTION.to_string(), |e| e.message.clone());
    tracing::warn!(?errors, "Shopify rejected gift card discount creation");
    ProvisionError::Rejected(message)
}

/// `GC-` followed by six random uppercase alphanumerics.
fn ephemeral_code() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..EPHEMERAL_LEN)
        .filter_map(|_| EPHEMERAL_CHARSET.choose(&mut rng).copied().map(char::from))
        .collect();
    format!("{EPHEMERAL_PREFIX}{suffix}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use gift_redeem_core::{DiscountStatus, Money};

    use super::*;
    use crate::services::redemption::memory::InMemoryBackend;

    fn card() -> GiftInstrument {
        GiftInstrument {
            id: "gid://shopify/GiftCard/1".to_string(),
            last_characters: "ab12".to_string(),
            balance: Money::new(Decimal::new(3000, 2), "USD"),
            enabled: true,
            customer_id: None,
        }
    }

    fn existing(code: &str, amount: Decimal) -> CodeDiscount {
        CodeDiscount {
            id: "gid://shopify/DiscountCodeNode/77".to_string(),
            code: code.to_string(),
            title: Some("Gift Card - AB12".to_string()),
            status: Some(DiscountStatus::Active),
            kind: DiscountKind::Basic,
            amount: Some(Money::new(amount, "USD")),
        }
    }

    fn provisioner() -> Provisioner {
        Provisioner::from_config(&RedemptionConfig::default())
    }

    fn code() -> CanonicalCode {
        CanonicalCode::new("gift-ab12")
    }

    #[tokio::test]
    async fn test_creates_when_missing() {
        let backend = InMemoryBackend::new();
        let amount = Decimal::new(3000, 2);

        let provisioned = provisioner()
            .provision(&backend, &code(), &card(), amount)
            .await
            .unwrap();

        assert_eq!(provisioned.code, "GIFT-AB12");
        assert_eq!(provisioned.outcome, ResolutionOutcome::Created);

        let created = backend.created().await;
        assert_eq!(created.len(), 1);
        let input = &created[0];
        assert_eq!(input.title, "Gift Card - AB12");
        assert_eq!(input.amount, amount);
        assert!(!input.applies_once_per_customer);
        assert!(input.starts_at < Utc::now());
        assert_eq!(input.ends_at - input.starts_at, chrono::Duration::minutes(61));
    }

    #[tokio::test]
    async fn test_second_call_reuses() {
        let backend = InMemoryBackend::new();
        let amount = Decimal::new(3000, 2);
        let p = provisioner();

        let first = p.provision(&backend, &code(), &card(), amount).await.unwrap();
        let second = p.provision(&backend, &code(), &card(), amount).await.unwrap();

        assert_eq!(first.code, second.code);
        assert_eq!(second.outcome, ResolutionOutcome::Reused);
        assert_eq!(backend.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_reuses_even_when_amount_differs() {
        let backend = InMemoryBackend::new().with_discount(existing("GIFT-AB12", Decimal::new(10, 0)));

        let provisioned = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap();

        assert_eq!(provisioned.outcome, ResolutionOutcome::Reused);
        assert_eq!(backend.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_taken_conflict_resolves_to_existing() {
        let backend =
            InMemoryBackend::new().with_concurrent_creation(existing("GIFT-AB12", Decimal::new(30, 0)));

        let provisioned = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap();

        assert_eq!(provisioned.code, "GIFT-AB12");
        assert_eq!(provisioned.outcome, ResolutionOutcome::Reused);
        assert_eq!(backend.lookup_calls(), 2);
        assert!(backend.created().await.is_empty());
    }

    #[tokio::test]
    async fn test_unrelated_promo_with_same_code_is_not_reused() {
        let promo = CodeDiscount {
            id: "gid://shopify/DiscountCodeNode/5".to_string(),
            code: "SUMMERAB12".to_string(),
            title: Some("Summer 10%".to_string()),
            status: Some(DiscountStatus::Expired),
            kind: DiscountKind::Basic,
            amount: None,
        };
        let backend = InMemoryBackend::new().with_discount(promo);

        let err = provisioner()
            .provision(&backend, &CanonicalCode::new("summerab12"), &card(), Decimal::new(30, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Rejected(ref m) if m == CODE_IN_USE_MESSAGE));
        assert_eq!(backend.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_active_fixed_amount_promo_is_not_reused() {
        let mut promo = existing("GIFT-AB12", Decimal::new(30, 0));
        promo.title = Some("Spring $30 off".to_string());
        let backend = InMemoryBackend::new().with_discount(promo);

        let err = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Rejected(_)));
        assert_eq!(backend.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_gift_code_is_replaced() {
        let mut expired = existing("GIFT-AB12", Decimal::new(30, 0));
        expired.status = Some(DiscountStatus::Expired);
        let backend = InMemoryBackend::new().with_discount(expired);

        let provisioned = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap();

        assert_eq!(provisioned.outcome, ResolutionOutcome::Created);
        assert!(provisioned.code.starts_with("GC-"));
        let created = backend.created().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].code, provisioned.code);
        assert_eq!(created[0].title, "Gift Card - AB12");
    }

    #[tokio::test]
    async fn test_taken_by_unrelated_discount_is_rejected() {
        let mut promo = existing("GIFT-AB12", Decimal::new(30, 0));
        promo.title = Some("Staff code".to_string());
        let backend = InMemoryBackend::new().with_concurrent_creation(promo);

        let err = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Rejected(_)));
        assert!(backend.created().await.is_empty());
    }

    #[tokio::test]
    async fn test_user_error_message_is_surfaced() {
        let backend = InMemoryBackend::new().with_create_rejection(vec![
            UserError {
                field: vec!["basicCodeDiscount".to_string(), "endsAt".to_string()],
                message: "Ends at needs to be after starts_at".to_string(),
                code: Some("INVALID".to_string()),
            },
            UserError {
                field: vec![],
                message: "second".to_string(),
                code: None,
            },
        ]);

        let err = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap_err();

        assert!(
            matches!(err, ProvisionError::Rejected(ref m) if m == "Ends at needs to be after starts_at")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_backend_error() {
        let backend = InMemoryBackend::new();
        backend.fail_create(true);

        let err = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Backend(_)));

        backend.fail_create(false);
        backend.fail_lookup(true);
        let err = provisioner()
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::Backend(_)));
    }

    #[tokio::test]
    async fn test_ephemeral_strategy_and_once_per_customer() {
        let config = RedemptionConfig {
            code_strategy: CodeStrategy::Ephemeral,
            reuse_policy: ReusePolicy::OncePerCustomer,
            code_ttl: chrono::Duration::minutes(15),
            ..RedemptionConfig::default()
        };
        let backend = InMemoryBackend::new();

        let provisioned = Provisioner::from_config(&config)
            .provision(&backend, &code(), &card(), Decimal::new(30, 0))
            .await
            .unwrap();

        assert!(provisioned.code.starts_with("GC-"));
        assert_ne!(provisioned.code, "GIFT-AB12");
        let input = &backend.created().await[0];
        assert!(input.applies_once_per_customer);
        assert_eq!(input.ends_at - input.starts_at, chrono::Duration::minutes(16));
    }

    #[test]
    fn test_ephemeral_code_shape() {
        let code = ephemeral_code();
        assert_eq!(code.len(), 9);
        let suffix = code.strip_prefix("GC-").unwrap();
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
