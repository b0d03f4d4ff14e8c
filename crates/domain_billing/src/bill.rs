//! Monthly bills
//!
//! A bill is the single authoritative statement for one tenant and one
//! billing period. It is created once; later mutations are limited to
//! other-charge recalculation and explicit paid-marking.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ApartmentId, BillId, BillingPeriod, Currency, Money, TenantId};

use crate::charges::{self, BillComponents};

/// The six utility component amounts on a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityCharges {
    pub electricity: Money,
    pub water: Money,
    pub gas: Money,
    pub internet: Money,
    pub cable_tv: Money,
    pub trash: Money,
}

impl UtilityCharges {
    /// All components zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            electricity: zero,
            water: zero,
            gas: zero,
            internet: zero,
            cable_tv: zero,
            trash: zero,
        }
    }

    /// Sum of all six components
    pub fn sum(&self) -> Money {
        self.electricity + self.water + self.gas + self.internet + self.cable_tv + self.trash
    }
}

/// A tenant's bill for one billing period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,
    /// Tenant billed
    pub tenant_id: TenantId,
    /// Apartment the charges relate to
    pub apartment_id: ApartmentId,
    /// Billing period; unique together with the tenant
    pub period: BillingPeriod,
    /// Full month's base rent, never prorated
    pub rent: Money,
    /// Utility components
    pub utilities: UtilityCharges,
    /// Aggregate of the bill's ad hoc charges
    pub other_charges: Money,
    /// Unpaid remainder carried in from the prior bill
    pub previous_balance: Money,
    /// Advance credit applied to this bill
    pub advance_payment: Money,
    /// Derived total, floored at zero
    pub total: Money,
    /// Whether the bill is settled
    pub is_paid: bool,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Creates a bill from its components, deriving the total
    pub fn new(
        tenant_id: TenantId,
        apartment_id: ApartmentId,
        period: BillingPeriod,
        due_date: NaiveDate,
        components: BillComponents,
    ) -> Self {
        let total = charges::total(&components);
        Self {
            id: BillId::new_v7(),
            tenant_id,
            apartment_id,
            period,
            rent: components.rent,
            utilities: components.utilities,
            other_charges: components.other_charges,
            previous_balance: components.previous_balance,
            advance_payment: components.advance_payment,
            total,
            is_paid: false,
            due_date,
            created_at: Utc::now(),
        }
    }

    /// The bill's currency
    pub fn currency(&self) -> Currency {
        self.rent.currency()
    }

    /// Snapshot of the bill as aggregator components
    pub fn components(&self) -> BillComponents {
        BillComponents {
            rent: self.rent,
            utilities: self.utilities,
            other_charges: self.other_charges,
            previous_balance: self.previous_balance,
            advance_payment: self.advance_payment,
        }
    }

    /// Replaces the other-charges aggregate and re-derives the total
    ///
    /// Both fields change together; callers persist the bill as one update
    /// so no inconsistent intermediate state is observable.
    pub fn apply_other_charges(&mut self, aggregate: Money) {
        self.other_charges = aggregate;
        self.total = charges::total(&self.components());
    }

    /// Marks the bill as paid
    pub fn mark_paid(&mut self) {
        self.is_paid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bill_with(rent: Money) -> Bill {
        let period = BillingPeriod::new(2024, 5).unwrap();
        Bill::new(
            TenantId::new(),
            ApartmentId::new(),
            period,
            period.day(10).unwrap(),
            BillComponents::rent_only(rent),
        )
    }

    #[test]
    fn test_new_bill_derives_total() {
        let bill = bill_with(Money::new(dec!(1000), Currency::USD));
        assert_eq!(bill.total.amount(), dec!(1000));
        assert!(!bill.is_paid);
    }

    #[test]
    fn test_apply_other_charges_recomputes_total() {
        let mut bill = bill_with(Money::new(dec!(1000), Currency::USD));

        bill.apply_other_charges(Money::new(dec!(150), Currency::USD));
        assert_eq!(bill.other_charges.amount(), dec!(150));
        assert_eq!(bill.total.amount(), dec!(1150));

        bill.apply_other_charges(Money::zero(Currency::USD));
        assert_eq!(bill.total.amount(), dec!(1000));
    }

    #[test]
    fn test_utility_sum() {
        let mut utilities = UtilityCharges::zero(Currency::USD);
        utilities.electricity = Money::new(dec!(120), Currency::USD);
        utilities.water = Money::new(dec!(30.50), Currency::USD);
        assert_eq!(utilities.sum().amount(), dec!(150.50));
    }

    #[test]
    fn test_mark_paid() {
        let mut bill = bill_with(Money::new(dec!(800), Currency::USD));
        bill.mark_paid();
        assert!(bill.is_paid);
    }
}
