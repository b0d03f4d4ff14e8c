//! Property-based test data generators

use core_kernel::{BillingPeriod, Currency, Money};
use proptest::prelude::*;

/// A non-negative USD amount up to one million dollars, in cents
pub fn usd_amount() -> impl Strategy<Value = Money> {
    (0i64..100_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// A positive USD amount, in cents
pub fn positive_usd_amount() -> impl Strategy<Value = Money> {
    (1i64..100_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Any valid billing period between 2000 and 2100
pub fn billing_period() -> impl Strategy<Value = BillingPeriod> {
    (2000i32..2100i32, 1u32..=12u32)
        .prop_map(|(year, month)| BillingPeriod::new(year, month).expect("generated in range"))
}
