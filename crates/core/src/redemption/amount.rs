//! Amount applied from a gift card.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::money::from_minor_units;

/// Amount to take from a gift card for a cart.
///
/// `min(balance, cart_total_minor / 100)`, rounded down to two decimal places
/// so the result never exceeds either bound. Negative inputs count as zero.
#[must_use]
pub fn applied_amount(balance: Decimal, cart_total_minor: i64) -> Decimal {
    let cart_total = from_minor_units(cart_total_minor);
    balance
        .max(Decimal::ZERO)
        .min(cart_total)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap_or_default()
    }

    #[test]
    fn test_balance_smaller_than_cart() {
        assert_eq!(applied_amount(dec("30.00"), 5000), dec("30.00"));
    }

    #[test]
    fn test_cart_smaller_than_balance() {
        assert_eq!(applied_amount(dec("100.00"), 2599), dec("25.99"));
    }

    #[test]
    fn test_never_exceeds_either_bound() {
        let balances = ["0", "0.01", "12.345", "30", "99.999", "1000"];
        let carts = [0_i64, 1, 999, 1234, 5000, 100_000];
        for balance in balances {
            for cart in carts {
                let b = dec(balance);
                let applied = applied_amount(b, cart);
                let cart_total = Decimal::new(cart, 2);
                assert!(applied <= b, "{applied} > balance {b}");
                assert!(applied <= cart_total, "{applied} > cart {cart_total}");
                if b >= cart_total {
                    assert_eq!(applied, cart_total);
                }
            }
        }
    }

    #[test]
    fn test_sub_cent_balance_rounds_down() {
        assert_eq!(applied_amount(dec("12.345"), 5000), dec("12.34"));
    }

    #[test]
    fn test_negative_inputs_clamp_to_zero() {
        assert_eq!(applied_amount(dec("30"), -100), Decimal::ZERO);
        assert_eq!(applied_amount(dec("-5"), 1000), Decimal::ZERO);
    }
}
