//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are carried at full precision through every calculation.
//! Rounding to two decimal places happens only in [`Price::display`] and
//! [`Price::rounded`], using round-half-away-from-zero, so `2.005` shows as
//! `$2.01` and `2.004` as `$2.00`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

/// Number of decimal places shown to customers.
const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in US dollars.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiply by a quantity without rounding.
    ///
    /// Saturates at [`Decimal::MAX`] rather than panicking.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency_code,
        )
    }

    /// Add another amount without rounding.
    ///
    /// The currency of `self` is kept.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self::new(self.amount.saturating_add(other.amount), self.currency_code)
    }

    /// The amount rounded to two decimal places, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        let mut rounded = self
            .amount
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_DECIMAL_PLACES);
        rounded
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.rounded())
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Serialize only the amount, as a JSON number.
///
/// Matches the listing wire format where `price` is a bare number. The
/// amount goes through `f64`, so digits beyond about 15 significant figures
/// are lost; a listing re-served from a high-precision string price is not
/// exact.
pub(crate) fn serialize_amount<S: Serializer>(price: &Price, serializer: S) -> Result<S::Ok, S::Error> {
    rust_decimal::serde::float::serialize(&price.amount, serializer)
}

/// ISO 4217 currency codes.
///
/// Listings carry no currency, so every price is in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn usd(s: &str) -> Price {
        Price::usd(s.parse().unwrap())
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(usd("10").display(), "$10.00");
        assert_eq!(usd("3.5").display(), "$3.50");
        assert_eq!(usd("0").display(), "$0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(usd("2.005").display(), "$2.01");
        assert_eq!(usd("2.004").display(), "$2.00");
        assert_eq!(usd("2.015").display(), "$2.02");
        assert_eq!(usd("2.025").display(), "$2.03");
    }

    #[test]
    fn test_times_keeps_full_precision() {
        let subtotal = usd("2.005").times(3);
        assert_eq!(subtotal.amount, "6.015".parse::<Decimal>().unwrap());
        assert_eq!(subtotal.display(), "$6.02");
    }

    #[test]
    fn test_accumulation_does_not_round_per_line() {
        // Rounding each line first would give 2.01 + 2.01 = 4.02.
        let total = usd("2.005").plus(usd("2.005"));
        assert_eq!(total.amount, "4.010".parse::<Decimal>().unwrap());
        assert_eq!(total.display(), "$4.01");
    }

    #[test]
    fn test_times_saturates() {
        let huge = Price::usd(Decimal::MAX).times(2);
        assert_eq!(huge.amount, Decimal::MAX);
    }

    #[test]
    fn test_is_negative() {
        assert!(usd("-0.01").is_negative());
        assert!(!usd("0").is_negative());
        assert!(!usd("-0").is_negative());
        assert!(!usd("1.00").is_negative());
    }

    #[test]
    fn test_default_currency_is_usd() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::USD);
        assert_eq!(Price::new(Decimal::ONE, CurrencyCode::default()).display(), "$1.00");
    }

    #[test]
    fn test_serialize_amount_is_a_json_number() {
        #[derive(Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_amount")]
            price: Price,
        }

        let json = serde_json::to_value(Wrapper { price: usd("3.50") }).unwrap();
        assert_eq!(json["price"], serde_json::json!(3.5));
    }
}
