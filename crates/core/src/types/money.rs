//! Monetary amounts using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A decimal amount with its ISO 4217 currency code.
///
/// Shopify reports balances as decimal strings (`"30.00"`) with a separate
/// currency code. Amounts are kept as [`Decimal`] so that balance math never
/// goes through floating point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Format for display, e.g. `USD 30.00`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency_code, self.amount)
    }
}

/// Convert an integer amount in minor units (cents) to standard units.
///
/// Negative totals are clamped to zero; a cart cannot be worth less than
/// nothing.
#[must_use]
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor.max(0), 2)
}
