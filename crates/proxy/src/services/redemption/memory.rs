//! In-memory [`RedemptionBackend`] for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use gift_redeem_core::{CodeDiscount, DiscountKind, DiscountStatus, GiftInstrument, Money};
use tokio::sync::Mutex;

use super::backend::{BackendError, CreateDiscountInput, CreateOutcome, RedemptionBackend, UserError};
use crate::shopify::GraphQLError;

/// Backend holding gift cards and code discounts in memory.
///
/// Behaves like Shopify where it matters to the resolver: code lookups are
/// case-insensitive and creating a code that exists is rejected with `TAKEN`.
/// Failures can be injected per operation and every call is counted.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    gift_cards: Mutex<Vec<GiftInstrument>>,
    discounts: Mutex<Vec<CodeDiscount>>,
    created: Mutex<Vec<CreateDiscountInput>>,
    rejection: Mutex<Option<Vec<UserError>>>,
    concurrent_winner: Mutex<Option<CodeDiscount>>,
    fail_snapshot: AtomicBool,
    fail_lookup: AtomicBool,
    fail_create: AtomicBool,
    snapshot_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl InMemoryBackend {
    /// An empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gift card. Cards are returned in insertion order, so add the
    /// newest first.
    #[must_use]
    pub fn with_gift_card(mut self, card: GiftInstrument) -> Self {
        self.gift_cards.get_mut().push(card);
        self
    }

    /// Add an existing code discount.
    #[must_use]
    pub fn with_discount(mut self, discount: CodeDiscount) -> Self {
        self.discounts.get_mut().push(discount);
        self
    }

    /// Reject the next create with these user errors.
    #[must_use]
    pub fn with_create_rejection(mut self, errors: Vec<UserError>) -> Self {
        *self.rejection.get_mut() = Some(errors);
        self
    }

    /// Simulate another request creating `discount` between this request's
    /// lookup and create: the next create stores it and answers `TAKEN`.
    #[must_use]
    pub fn with_concurrent_creation(mut self, discount: CodeDiscount) -> Self {
        *self.concurrent_winner.get_mut() = Some(discount);
        self
    }

    /// Make snapshot fetches fail.
    pub fn fail_snapshot(&self, fail: bool) {
        self.fail_snapshot.store(fail, Ordering::SeqCst);
    }

    /// Make code lookups fail.
    pub fn fail_lookup(&self, fail: bool) {
        self.fail_lookup.store(fail, Ordering::SeqCst);
    }

    /// Make creates fail at the transport level.
    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Number of snapshot fetches so far.
    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    /// Number of code lookups so far.
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Number of create attempts so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Inputs of every discount this backend created.
    pub async fn created(&self) -> Vec<CreateDiscountInput> {
        self.created.lock().await.clone()
    }
}

fn injected(operation: &str) -> BackendError {
    BackendError::GraphQL(vec![GraphQLError::message(format!(
        "injected {operation} failure"
    ))])
}

#[async_trait]
impl RedemptionBackend for InMemoryBackend {
    async fn fetch_gift_cards(&self, limit: i64) -> Result<Vec<GiftInstrument>, BackendError> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_snapshot.load(Ordering::SeqCst) {
            return Err(injected("snapshot"));
        }

        let take = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .gift_cards
            .lock()
            .await
            .iter()
            .filter(|card| card.enabled)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_code_discount(&self, code: &str) -> Result<Option<CodeDiscount>, BackendError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(injected("lookup"));
        }

        Ok(self
            .discounts
            .lock()
            .await
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
            .cloned())
    }

    async fn create_code_discount(
        &self,
        input: &CreateDiscountInput,
    ) -> Result<CreateOutcome, BackendError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(injected("create"));
        }

        if let Some(errors) = self.rejection.lock().await.take() {
            return Ok(CreateOutcome::Rejected(errors));
        }

        let mut discounts = self.discounts.lock().await;
        if let Some(winner) = self.concurrent_winner.lock().await.take() {
            discounts.push(winner);
        }

        if discounts.iter().any(|d| d.code.eq_ignore_ascii_case(&input.code)) {
            return Ok(CreateOutcome::Rejected(vec![UserError {
                field: vec!["basicCodeDiscount".to_string(), "code".to_string()],
                message: "Code must be unique. Please try a different code.".to_string(),
                code: Some("TAKEN".to_string()),
            }]));
        }

        let id = format!("gid://shopify/DiscountCodeNode/{}", discounts.len() + 1);
        discounts.push(CodeDiscount {
            id: id.clone(),
            code: input.code.clone(),
            title: Some(input.title.clone()),
            status: Some(DiscountStatus::Active),
            kind: DiscountKind::Basic,
            amount: Some(Money::new(input.amount, "USD")),
        });
        self.created.lock().await.push(input.clone());

        Ok(CreateOutcome::Created { id })
    }
}
