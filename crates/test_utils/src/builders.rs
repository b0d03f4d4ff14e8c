//! Test Data Builders
//!
//! Builder patterns for constructing test entities with sensible defaults.
//! Tests specify only the fields that matter and take defaults for the
//! rest.

use chrono::{NaiveDate, Utc};
use core_kernel::{ApartmentId, BillId, BillingPeriod, Currency, Money, PaymentId, TenantId};
use rust_decimal_macros::dec;

use domain_billing::account::{LedgerAccount, TenancyStatus, UtilityServices};
use domain_billing::bill::{Bill, UtilityCharges};
use domain_billing::payment::{Payment, PaymentMethod};
use domain_billing::ports::ActiveTenant;

use crate::fixtures::{MoneyFixtures, PeriodFixtures};

/// Builder for ledger accounts
pub struct LedgerAccountBuilder {
    tenant_id: TenantId,
    apartment_id: ApartmentId,
    advance_payment: Money,
    security_deposit: Money,
    status: TenancyStatus,
    utilities: UtilityServices,
}

impl Default for LedgerAccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerAccountBuilder {
    pub fn new() -> Self {
        Self {
            tenant_id: TenantId::new_v7(),
            apartment_id: ApartmentId::new_v7(),
            advance_payment: MoneyFixtures::usd_zero(),
            security_deposit: MoneyFixtures::usd_zero(),
            status: TenancyStatus::Active,
            utilities: UtilityServices::all_enabled(),
        }
    }

    pub fn with_tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    pub fn with_advance(mut self, advance: Money) -> Self {
        self.advance_payment = advance;
        self
    }

    pub fn with_deposit(mut self, deposit: Money) -> Self {
        self.security_deposit = deposit;
        self
    }

    pub fn with_utilities(mut self, utilities: UtilityServices) -> Self {
        self.utilities = utilities;
        self
    }

    pub fn closed(mut self) -> Self {
        self.status = TenancyStatus::Closed;
        self
    }

    pub fn build(self) -> LedgerAccount {
        LedgerAccount {
            tenant_id: self.tenant_id,
            apartment_id: self.apartment_id,
            advance_payment: self.advance_payment,
            security_deposit: self.security_deposit,
            status: self.status,
            utilities: self.utilities,
            updated_at: Utc::now(),
        }
    }

    /// Builds the account joined with apartment data, as a batch run sees it
    pub fn build_active_tenant(self, base_rent: Money) -> ActiveTenant {
        ActiveTenant {
            account: self.build(),
            base_rent,
        }
    }
}

/// Builder for bills
///
/// The total is derived from the components unless a test pins it
/// explicitly to reproduce stored history.
pub struct BillBuilder {
    tenant_id: TenantId,
    apartment_id: ApartmentId,
    period: BillingPeriod,
    rent: Money,
    utilities: UtilityCharges,
    other_charges: Money,
    previous_balance: Money,
    advance_payment: Money,
    total: Option<Money>,
    is_paid: bool,
    due_date: Option<NaiveDate>,
}

impl Default for BillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillBuilder {
    pub fn new() -> Self {
        Self {
            tenant_id: TenantId::new_v7(),
            apartment_id: ApartmentId::new_v7(),
            period: PeriodFixtures::jan_2024(),
            rent: MoneyFixtures::usd(dec!(1000)),
            utilities: UtilityCharges::zero(Currency::USD),
            other_charges: MoneyFixtures::usd_zero(),
            previous_balance: MoneyFixtures::usd_zero(),
            advance_payment: MoneyFixtures::usd_zero(),
            total: None,
            is_paid: false,
            due_date: None,
        }
    }

    pub fn with_tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    pub fn with_period(mut self, period: BillingPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn with_rent(mut self, rent: Money) -> Self {
        self.rent = rent;
        self
    }

    pub fn with_previous_balance(mut self, balance: Money) -> Self {
        self.previous_balance = balance;
        self
    }

    pub fn with_advance(mut self, advance: Money) -> Self {
        self.advance_payment = advance;
        self
    }

    /// Pins the stored total, bypassing derivation
    pub fn with_total(mut self, total: Money) -> Self {
        self.total = Some(total);
        self
    }

    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }

    pub fn build(self) -> Bill {
        let components = domain_billing::charges::BillComponents {
            rent: self.rent,
            utilities: self.utilities,
            other_charges: self.other_charges,
            previous_balance: self.previous_balance,
            advance_payment: self.advance_payment,
        };
        let total = self
            .total
            .unwrap_or_else(|| domain_billing::charges::total(&components));
        let due_date = self
            .due_date
            .unwrap_or_else(|| self.period.day(10).expect("day 10 exists"));
        Bill {
            id: BillId::new_v7(),
            tenant_id: self.tenant_id,
            apartment_id: self.apartment_id,
            period: self.period,
            rent: self.rent,
            utilities: self.utilities,
            other_charges: self.other_charges,
            previous_balance: self.previous_balance,
            advance_payment: self.advance_payment,
            total,
            is_paid: self.is_paid,
            due_date,
            created_at: Utc::now(),
        }
    }
}

/// Builder for payments
pub struct PaymentBuilder {
    tenant_id: TenantId,
    amount: Money,
    paid_on: NaiveDate,
    remaining_balance: Money,
    method: PaymentMethod,
    reference: Option<String>,
}

impl Default for PaymentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentBuilder {
    pub fn new() -> Self {
        Self {
            tenant_id: TenantId::new_v7(),
            amount: MoneyFixtures::usd(dec!(1000)),
            paid_on: NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
            remaining_balance: MoneyFixtures::usd_zero(),
            method: PaymentMethod::BankTransfer,
            reference: None,
        }
    }

    pub fn with_tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    pub fn build(self) -> Payment {
        Payment {
            id: PaymentId::new_v7(),
            tenant_id: self.tenant_id,
            amount: self.amount,
            paid_on: self.paid_on,
            remaining_balance: self.remaining_balance,
            method: self.method,
            reference: self.reference,
            created_at: Utc::now(),
        }
    }
}
