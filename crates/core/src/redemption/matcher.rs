//! Gift card matching against a snapshot.

use std::cmp::Ordering;

use crate::types::{CanonicalCode, CustomerId, GiftInstrument};

use super::binding::customer_may_redeem;

/// Prefix shoppers are told to type in front of a gift card's last characters.
pub const DEFAULT_GIFT_PREFIX: &str = "GIFT-";

/// How a code matched a gift card's display tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// The code ends with the tag.
    Suffix,
    /// The code is exactly the prefix followed by the tag.
    Exact,
}

/// A gift card selected for a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftMatch<'a> {
    /// The selected card.
    pub card: &'a GiftInstrument,
    /// How the code matched it.
    pub kind: MatchKind,
    /// Number of other redeemable cards that matched with the same kind.
    pub ambiguous: usize,
}

/// Finds the gift card a canonical code refers to.
///
/// A candidate is considered in snapshot order (most recent first) and is
/// skipped when it is disabled, has no display tag, or is bound to another
/// customer. An exact `PREFIX + tag` match beats a suffix match; among equal
/// kinds the first in snapshot order wins.
///
/// This is not plain first-match-in-snapshot-order. Under first-match, a
/// newer card whose tag is a suffix of the code (say `B12`) would shadow the
/// older card the shopper actually named with `GIFT-AB12`.
///
/// Display tags are assumed to be unique among recent enabled cards. When that
/// assumption fails the ambiguity is reported on the match and logged.
#[derive(Debug, Clone)]
pub struct GiftMatcher {
    prefix: String,
}

impl Default for GiftMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_GIFT_PREFIX)
    }
}

impl GiftMatcher {
    /// Create a matcher using `prefix` for exact matches.
    ///
    /// The prefix is canonicalized the same way codes are.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: CanonicalCode::new(prefix).into_inner(),
        }
    }

    /// The canonical exact-match prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Classify how `code` relates to `card`, ignoring customer binding.
    #[must_use]
    pub fn match_kind(&self, code: &CanonicalCode, card: &GiftInstrument) -> Option<MatchKind> {
        if !card.enabled {
            return None;
        }
        let tag = card.display_tag()?;
        let code = code.as_str();

        if code.strip_prefix(self.prefix.as_str()) == Some(tag.as_str()) {
            Some(MatchKind::Exact)
        } else if code.ends_with(tag.as_str()) {
            Some(MatchKind::Suffix)
        } else {
            None
        }
    }

    /// Select the card `code` refers to, if any.
    pub fn find<'a>(
        &self,
        code: &CanonicalCode,
        snapshot: &'a [GiftInstrument],
        customer: Option<&CustomerId>,
    ) -> Option<GiftMatch<'a>> {
        let mut best: Option<GiftMatch<'a>> = None;

        for card in snapshot {
            let Some(kind) = self.match_kind(code, card) else {
                continue;
            };

            if !customer_may_redeem(card, customer) {
                tracing::debug!(
                    gift_card_id = %card.id,
                    has_customer = customer.is_some(),
                    "Gift card tag matched but customer binding rejected it"
                );
                continue;
            }

            if let Some(current) = best.as_mut() {
                match current.kind.cmp(&kind) {
                    Ordering::Equal => {
                        current.ambiguous += 1;
                        continue;
                    }
                    Ordering::Greater => continue,
                    Ordering::Less => {}
                }
            }

            best = Some(GiftMatch {
                card,
                kind,
                ambiguous: 0,
            });
        }

        if let Some(found) = &best
            && found.ambiguous > 0
        {
            tracing::warn!(
                gift_card_id = %found.card.id,
                ambiguous = found.ambiguous,
                "Several gift cards share a display tag; using the most recent"
            );
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::Money;

    fn card(id: &str, last: &str, enabled: bool, customer: Option<&str>) -> GiftInstrument {
        GiftInstrument {
            id: id.to_string(),
            last_characters: last.to_string(),
            balance: Money::new(Decimal::new(3000, 2), "USD"),
            enabled,
            customer_id: customer.map(String::from),
        }
    }

    fn code(s: &str) -> CanonicalCode {
        CanonicalCode::new(s)
    }

    #[test]
    fn test_exact_prefix_match() {
        let snapshot = [card("gc1", "ab12", true, None)];
        let found = GiftMatcher::default().find(&code("gift-ab12"), &snapshot, None);
        let found = found.map(|m| (m.card.id.as_str(), m.kind));
        assert_eq!(found, Some(("gc1", MatchKind::Exact)));
    }

    #[test]
    fn test_suffix_match() {
        let snapshot = [card("gc1", "AB12", true, None)];
        let found = GiftMatcher::default().find(&code("XXXX YYYY ZZZZ AB12"), &snapshot, None);
        assert_eq!(found.map(|m| m.kind), Some(MatchKind::Suffix));
    }

    #[test]
    fn test_no_match() {
        let snapshot = [card("gc1", "AB12", true, None)];
        assert!(
            GiftMatcher::default()
                .find(&code("SAVE10"), &snapshot, None)
                .is_none()
        );
    }

    #[test]
    fn test_skips_disabled_and_tagless() {
        let snapshot = [
            card("disabled", "AB12", false, None),
            card("tagless", "", true, None),
            card("live", "AB12", true, None),
        ];
        let found = GiftMatcher::default().find(&code("GIFT-AB12"), &snapshot, None);
        assert_eq!(found.map(|m| m.card.id.as_str()), Some("live"));
    }

    #[test]
    fn test_tagless_card_never_matches_everything() {
        // An empty tag would otherwise be a suffix of every code
        let snapshot = [card("tagless", "  ", true, None)];
        assert!(
            GiftMatcher::default()
                .find(&code("ANYTHING"), &snapshot, None)
                .is_none()
        );
    }

    #[test]
    fn test_binding_rejection_continues_scanning() {
        let snapshot = [
            card("theirs", "AB12", true, Some("gid://shopify/Customer/1")),
            card("mine", "AB12", true, Some("gid://shopify/Customer/2")),
        ];
        let me = CustomerId::new("2");
        let found = GiftMatcher::default().find(&code("GIFT-AB12"), &snapshot, Some(&me));
        assert_eq!(found.map(|m| m.card.id.as_str()), Some("mine"));
    }

    #[test]
    fn test_bound_card_never_matches_anonymous_or_other_customer() {
        let snapshot = [card("gc1", "AB12", true, Some("gid://shopify/Customer/1"))];
        let matcher = GiftMatcher::default();
        assert!(matcher.find(&code("GIFT-AB12"), &snapshot, None).is_none());
        let other = CustomerId::new("9");
        assert!(
            matcher
                .find(&code("GIFT-AB12"), &snapshot, Some(&other))
                .is_none()
        );
    }

    #[test]
    fn test_exact_beats_earlier_suffix() {
        // "GIFT-XAB12" ends with "AB12" (suffix) and is exactly GIFT- + "XAB12"
        let snapshot = [
            card("suffix", "AB12", true, None),
            card("exact", "XAB12", true, None),
        ];
        let found = GiftMatcher::default().find(&code("GIFT-XAB12"), &snapshot, None);
        assert_eq!(found.map(|m| m.card.id.as_str()), Some("exact"));
    }

    #[test]
    fn test_first_in_snapshot_order_wins_and_reports_ambiguity() {
        let snapshot = [
            card("newest", "AB12", true, None),
            card("older", "AB12", true, None),
        ];
        let found = GiftMatcher::default().find(&code("GIFT-AB12"), &snapshot, None);
        assert_eq!(found.map(|m| (m.card.id.as_str(), m.ambiguous)), Some(("newest", 1)));
    }

    #[test]
    fn test_custom_prefix_is_canonicalized() {
        let matcher = GiftMatcher::new(" gc ");
        assert_eq!(matcher.prefix(), "GC");
        let snapshot = [card("gc1", "ZZ99", true, None)];
        let found = matcher.find(&code("gczz99"), &snapshot, None);
        assert_eq!(found.map(|m| m.kind), Some(MatchKind::Exact));
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(
            GiftMatcher::default()
                .find(&code("GIFT-AB12"), &[], None)
                .is_none()
        );
    }
}
