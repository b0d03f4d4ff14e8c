//! Charge aggregation
//!
//! The one place the bill total is derived. Pure arithmetic: sum the charge
//! side, subtract the advance, floor at zero.

use core_kernel::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::bill::UtilityCharges;

/// The inputs to a bill total
///
/// Absent components are represented as zero; [`BillComponents::new`] starts
/// everything at zero and callers fill in what they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillComponents {
    pub rent: Money,
    pub utilities: UtilityCharges,
    pub other_charges: Money,
    pub previous_balance: Money,
    pub advance_payment: Money,
}

impl BillComponents {
    /// All components zero in the given currency
    pub fn new(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            rent: zero,
            utilities: UtilityCharges::zero(currency),
            other_charges: zero,
            previous_balance: zero,
            advance_payment: zero,
        }
    }

    /// Components with only the rent set
    pub fn rent_only(rent: Money) -> Self {
        Self {
            rent,
            ..Self::new(rent.currency())
        }
    }
}

/// The charge side of a bill, before the advance is applied
pub fn gross(components: &BillComponents) -> Money {
    components.rent
        + components.utilities.sum()
        + components.other_charges
        + components.previous_balance
}

/// Derives a bill total from its components
///
/// `total = max(0, rent + utilities + other_charges + previous_balance - advance_payment)`
pub fn total(components: &BillComponents) -> Money {
    gross(components).saturating_sub(&components.advance_payment)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn total_is_never_negative(
            rent in 0i64..10_000_000i64,
            other in 0i64..10_000_000i64,
            balance in 0i64..10_000_000i64,
            advance in 0i64..30_000_000i64
        ) {
            let mut components =
                BillComponents::rent_only(Money::from_minor(rent, Currency::USD));
            components.other_charges = Money::from_minor(other, Currency::USD);
            components.previous_balance = Money::from_minor(balance, Currency::USD);
            components.advance_payment = Money::from_minor(advance, Currency::USD);

            prop_assert!(!total(&components).is_negative());
        }

        #[test]
        fn total_matches_floored_sum(
            rent in 0i64..10_000_000i64,
            advance in 0i64..30_000_000i64
        ) {
            let mut components =
                BillComponents::rent_only(Money::from_minor(rent, Currency::USD));
            components.advance_payment = Money::from_minor(advance, Currency::USD);

            let expected = Money::from_minor((rent - advance).max(0), Currency::USD);
            prop_assert_eq!(total(&components), expected);
        }
    }
}
