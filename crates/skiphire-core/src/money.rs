//! Money type for representing monetary values.
//!
//! Amounts are stored in the smallest currency unit (pence for GBP) so that
//! comparisons against whole-pound price bounds stay exact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "GBP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "£").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Number of minor units per major unit.
    pub fn minor_per_major(&self) -> i64 {
        100
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., pence).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole major units (e.g., pounds).
    ///
    /// Saturates at the bounds of `i64` rather than overflowing.
    ///
    /// ```
    /// use skiphire_core::money::{Money, Currency};
    /// let price = Money::from_whole(240, Currency::GBP);
    /// assert_eq!(price.amount_minor, 24000);
    /// ```
    pub fn from_whole(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Whole major units, truncating any minor remainder.
    pub fn whole_units(&self) -> i64 {
        self.amount_minor / self.currency.minor_per_major()
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format with symbol and two decimals (e.g., "£49.99").
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }

    /// Format with symbol, dropping the minor part when it is zero (e.g., "£240").
    pub fn display_compact(&self) -> String {
        if self.amount_minor % self.currency.minor_per_major() == 0 {
            format!("{}{}", self.currency.symbol(), self.whole_units())
        } else {
            self.display()
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_compact())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_whole() {
        let m = Money::from_whole(240, Currency::GBP);
        assert_eq!(m.amount_minor, 24000);
        assert_eq!(m.whole_units(), 240);
    }

    #[test]
    fn test_money_from_whole_saturates() {
        let m = Money::from_whole(100_000_000_000_000_000, Currency::GBP);
        assert_eq!(m.amount_minor, i64::MAX);

        let m = Money::from_whole(i64::MIN, Currency::GBP);
        assert_eq!(m.amount_minor, i64::MIN);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::GBP).display(), "\u{00a3}49.99");
        assert_eq!(Money::from_whole(240, Currency::GBP).to_string(), "\u{00a3}240");
        assert_eq!(Money::new(2550, Currency::GBP).to_string(), "\u{00a3}25.50");
    }

    #[test]
    fn test_money_ordering() {
        let low = Money::from_whole(200, Currency::GBP);
        let high = Money::from_whole(201, Currency::GBP);
        assert!(low < high);
    }
}
