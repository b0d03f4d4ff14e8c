//! Tenant ledger accounts
//!
//! The ledger account is the tenant's persistent financial state: standing
//! credit, security deposit, and tenancy status. Bill generation, payment
//! reconciliation, and settlement all read-modify-write this record, which
//! is why those operations serialize on the tenant's lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ApartmentId, Currency, Money, TenantId};

/// Lifecycle of a tenancy
///
/// Closure is a one-way transition; a closed tenancy cannot be settled a
/// second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenancyStatus {
    /// Tenancy is live and billed monthly
    Active,
    /// Tenancy has been settled and closed
    Closed,
}

/// Which utility services a tenant has enabled
///
/// These flags are carried on the account but are not consulted when bills
/// are generated; utility amounts start at zero and are filled in manually
/// (see the utility seed on the bill factory).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityServices {
    pub electricity: bool,
    pub water: bool,
    pub gas: bool,
    pub internet: bool,
    pub cable_tv: bool,
    pub trash: bool,
}

impl UtilityServices {
    /// All six services enabled
    pub fn all_enabled() -> Self {
        Self {
            electricity: true,
            water: true,
            gas: true,
            internet: true,
            cable_tv: true,
            trash: true,
        }
    }
}

/// A tenant's financial state in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Tenant this account belongs to
    pub tenant_id: TenantId,
    /// Apartment the tenant occupies
    pub apartment_id: ApartmentId,
    /// Standing credit carried forward to offset future bills, never negative
    pub advance_payment: Money,
    /// Security deposit held against the tenancy, never negative
    pub security_deposit: Money,
    /// Tenancy lifecycle status
    pub status: TenancyStatus,
    /// Enabled utility services
    pub utilities: UtilityServices,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl LedgerAccount {
    /// Creates a fresh active account with zero balances
    pub fn new(tenant_id: TenantId, apartment_id: ApartmentId, currency: Currency) -> Self {
        Self {
            tenant_id,
            apartment_id,
            advance_payment: Money::zero(currency),
            security_deposit: Money::zero(currency),
            status: TenancyStatus::Active,
            utilities: UtilityServices::default(),
            updated_at: Utc::now(),
        }
    }

    /// Returns true while the tenancy is active
    pub fn is_active(&self) -> bool {
        self.status == TenancyStatus::Active
    }

    /// Consumes the standing credit, leaving it at zero
    ///
    /// Bill generation takes the whole credit regardless of whether it
    /// covers the new bill.
    pub fn take_standing_credit(&mut self) -> Money {
        let zero = Money::zero(self.advance_payment.currency());
        let taken = self.advance_payment;
        self.advance_payment = zero;
        self.updated_at = Utc::now();
        taken
    }

    /// Replaces the standing credit with the given amount
    pub fn set_standing_credit(&mut self, amount: Money) {
        self.advance_payment = amount;
        self.updated_at = Utc::now();
    }

    /// Closes the tenancy: zeroes both balances and marks the account closed
    ///
    /// Callers check the status precondition first; this method only
    /// applies the transition so the three mutations always travel
    /// together.
    pub fn close(&mut self) {
        let currency = self.advance_payment.currency();
        self.advance_payment = Money::zero(currency);
        self.security_deposit = Money::zero(self.security_deposit.currency());
        self.status = TenancyStatus::Closed;
        self.updated_at = Utc::now();
    }
}
