//! Canonical shopper-submitted code.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A shopper-submitted code in canonical form.
///
/// Shoppers type gift card and discount codes with stray spaces and mixed
/// case. The canonical form strips every whitespace character and uppercases
/// the rest, so `" gift- ab12 "` and `"GIFT-AB12"` compare equal.
///
/// Canonicalization is total and idempotent: normalizing an already
/// canonical code yields the same string.
///
/// ## Examples
///
/// ```
/// use gift_redeem_core::CanonicalCode;
///
/// let code = CanonicalCode::new(" gift-ab 12\t");
/// assert_eq!(code.as_str(), "GIFT-AB12");
///
/// let again = CanonicalCode::new(code.as_str());
/// assert_eq!(again, code);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CanonicalCode(String);

impl CanonicalCode {
    /// Canonicalize a raw code.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        Self(stripped.to_uppercase())
    }

    /// Returns the canonical code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if nothing is left after canonicalization.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the code and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CanonicalCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for CanonicalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_all_whitespace() {
        let code = CanonicalCode::new("  save\t10 \n");
        assert_eq!(code.as_str(), "SAVE10");
    }

    #[test]
    fn test_strips_unicode_whitespace() {
        // Non-breaking and ideographic spaces pasted from emails
        let code = CanonicalCode::new("gift\u{00A0}-\u{3000}ab12");
        assert_eq!(code.as_str(), "GIFT-AB12");
    }

    #[test]
    fn test_uppercases() {
        assert_eq!(CanonicalCode::new("Gift-aB12").as_str(), "GIFT-AB12");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "   ",
            "gift-ab12",
            " Save 10 ",
            "straße",
            "ǆ mixed ǅ",
            "GIFT-AB12",
        ];
        for input in inputs {
            let once = CanonicalCode::new(input);
            let twice = CanonicalCode::new(once.as_str());
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(CanonicalCode::new(" \t\n").is_empty());
        assert!(!CanonicalCode::new("a").is_empty());
    }

    #[test]
    fn test_display_matches_as_str() {
        let code = CanonicalCode::from("ab 12");
        assert_eq!(code.to_string(), "AB12");
        assert_eq!(code.as_ref(), "AB12");
    }
}
