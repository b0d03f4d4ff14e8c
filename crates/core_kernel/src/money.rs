//! Money
//!
//! Amounts are exact decimals tagged with a currency. The ledger's
//! conservation arithmetic (carryover, credit consumption, settlement
//! netting) must come out to the cent, so binary floating point never
//! appears anywhere in the crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// ISO 4217 currencies the ledger bills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
    PHP,
    SGD,
    AUD,
    JPY,
}

impl Currency {
    /// Decimal places of the currency's minor unit
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
            Currency::PHP => "₱",
            Currency::SGD => "S$",
            Currency::AUD => "A$",
            Currency::JPY => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::PHP => "PHP",
            Currency::SGD => "SGD",
            Currency::AUD => "AUD",
            Currency::JPY => "JPY",
        };
        f.write_str(code)
    }
}

/// Errors from monetary arithmetic
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },
}

/// An exact amount in one currency
///
/// The full decimal precision is kept internally; [`Money::round_to_currency`]
/// narrows to the currency's minor unit at the edges. Ordering compares the
/// amount first, which the domain relies on only for same-currency values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// An amount given in minor units (cents for USD)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self {
            amount: Decimal::new(minor_units, currency.decimal_places()),
            currency,
        }
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Narrows to the currency's minor-unit precision
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp(self.currency.decimal_places()),
            currency: self.currency,
        }
    }

    fn guard_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            })
        }
    }

    /// Addition that rejects a currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.guard_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Subtraction that rejects a currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.guard_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Subtraction floored at zero: `max(0, self - other)`
    ///
    /// Every carryover and settlement rule is stated in this form, so it
    /// gets a named operation instead of scattered `max` calls.
    pub fn saturating_sub(&self, other: &Money) -> Money {
        let diff = self
            .checked_sub(other)
            .expect("currency mismatch in Money::saturating_sub");
        if diff.is_negative() {
            Money::zero(self.currency)
        } else {
            diff
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.currency.decimal_places() as usize;
        write!(f, "{}{:.*}", self.currency.symbol(), places, self.amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("currency mismatch in Money::sub")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minor_units_respect_currency_scale() {
        assert_eq!(Money::from_minor(10050, Currency::USD).amount(), dec!(100.50));
        assert_eq!(Money::from_minor(10000, Currency::JPY).amount(), dec!(10000));
    }

    #[test]
    fn test_operator_arithmetic() {
        let rent = Money::new(dec!(1300.00), Currency::USD);
        let advance = Money::new(dec!(500.00), Currency::USD);

        assert_eq!((rent + advance).amount(), dec!(1800.00));
        assert_eq!((rent - advance).amount(), dec!(800.00));
    }

    #[test]
    fn test_mismatched_currencies_are_rejected() {
        let usd = Money::new(dec!(100), Currency::USD);
        let eur = Money::new(dec!(100), Currency::EUR);

        assert_eq!(
            usd.checked_add(&eur),
            Err(MoneyError::CurrencyMismatch {
                left: Currency::USD,
                right: Currency::EUR,
            })
        );
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let small = Money::new(dec!(300), Currency::USD);
        let large = Money::new(dec!(1000), Currency::USD);

        assert_eq!(small.saturating_sub(&large), Money::zero(Currency::USD));
        assert_eq!(large.saturating_sub(&small).amount(), dec!(700));
    }

    #[test]
    fn test_ordering_follows_amount() {
        let small = Money::new(dec!(400), Currency::USD);
        let large = Money::new(dec!(600), Currency::USD);

        assert!(large >= small);
        assert!(small < large);
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Money::new(dec!(-50), Currency::USD).is_negative());
        assert!(Money::new(dec!(50), Currency::USD).is_positive());

        let zero = Money::zero(Currency::USD);
        assert!(!zero.is_negative());
        assert!(!zero.is_positive());
        assert!(zero.is_zero());
    }
}
