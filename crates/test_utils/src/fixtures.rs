//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities. Fixtures are consistent and
//! predictable so assertions can use literal expected values.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{
    ApartmentId, BillId, BillingPeriod, Currency, FixedClock, Money, TenantId,
};
use rust_decimal::Decimal;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A USD amount from a decimal literal
    pub fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Zero USD
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// The standard test rent
    pub fn rent() -> Money {
        Money::new(Decimal::new(100000, 2), Currency::USD)
    }

    /// The standard test security deposit
    pub fn deposit() -> Money {
        Money::new(Decimal::new(200000, 2), Currency::USD)
    }
}

/// Fixture for billing period test data
pub struct PeriodFixtures;

impl PeriodFixtures {
    pub fn dec_2023() -> BillingPeriod {
        BillingPeriod::new(2023, 12).expect("valid period")
    }

    pub fn jan_2024() -> BillingPeriod {
        BillingPeriod::new(2024, 1).expect("valid period")
    }

    pub fn feb_2024() -> BillingPeriod {
        BillingPeriod::new(2024, 2).expect("valid period")
    }

    pub fn jun_2024() -> BillingPeriod {
        BillingPeriod::new(2024, 6).expect("valid period")
    }
}

/// Fixture for clock test data
pub struct ClockFixtures;

impl ClockFixtures {
    /// Mid-June 2024, morning
    pub fn mid_jun_2024() -> FixedClock {
        FixedClock::at(Self::mid_jun_2024_instant())
    }

    pub fn mid_jun_2024_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0)
            .single()
            .expect("valid instant")
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    pub fn tenant_id() -> TenantId {
        TenantId::new_v7()
    }

    pub fn apartment_id() -> ApartmentId {
        ApartmentId::new_v7()
    }

    pub fn bill_id() -> BillId {
        BillId::new_v7()
    }
}
