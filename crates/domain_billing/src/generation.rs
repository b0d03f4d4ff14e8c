//! Bill generation
//!
//! The bill factory builds, or returns, the single bill for a tenant and
//! period. Generation is idempotent at the bill level: a duplicate call
//! finds the existing bill and touches nothing else. Everything else is
//! carryover arithmetic: prior unpaid remainder in, leftover advance and
//! standing credit consumed against the new total.

use std::sync::Arc;
use tracing::{debug, error, info};

use chrono::NaiveDate;
use core_kernel::{BillingPeriod, Currency, Money};

use crate::account::LedgerAccount;
use crate::bill::{Bill, UtilityCharges};
use crate::charges::{self, BillComponents};
use crate::error::BillingError;
use crate::locks::TenantLocks;
use crate::ports::{ActiveTenant, BillingPort};

/// Source of the utility amounts a freshly generated bill starts with
///
/// The system populates utility components as zero at generation time and
/// expects them to be filled in manually later. Whether they should instead
/// pull from the apartment's standard rates when the tenant has the service
/// enabled is an open question; this trait is the seam for that decision,
/// and [`ZeroUtilitySeed`] keeps the current behavior.
pub trait UtilitySeed: Send + Sync {
    fn initial_charges(&self, account: &LedgerAccount, currency: Currency) -> UtilityCharges;
}

/// Seeds every utility component with zero, ignoring the enable flags
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroUtilitySeed;

impl UtilitySeed for ZeroUtilitySeed {
    fn initial_charges(&self, _account: &LedgerAccount, currency: Currency) -> UtilityCharges {
        UtilityCharges::zero(currency)
    }
}

/// Builds or returns the single bill for a tenant and period
pub struct BillFactory {
    port: Arc<dyn BillingPort>,
    locks: Arc<TenantLocks>,
    utility_seed: Arc<dyn UtilitySeed>,
}

impl BillFactory {
    pub fn new(port: Arc<dyn BillingPort>, locks: Arc<TenantLocks>) -> Self {
        Self {
            port,
            locks,
            utility_seed: Arc::new(ZeroUtilitySeed),
        }
    }

    /// Replaces the utility seed
    pub fn with_utility_seed(mut self, seed: Arc<dyn UtilitySeed>) -> Self {
        self.utility_seed = seed;
        self
    }

    /// Generates the bill for one tenant and period
    ///
    /// If a bill already exists for the pair it is returned unchanged, with
    /// no recomputation and no ledger mutation. Otherwise:
    ///
    /// - `previous_balance` = prior bill's unpaid remainder, else zero
    /// - `advance_payment` = leftover advance from the prior bill plus the
    ///   tenant's standing credit, which is consumed to zero regardless of
    ///   whether it covers the new bill
    /// - rent is the apartment's base rent in full (no proration)
    /// - utility components come from the seed (zero by default)
    ///
    /// When the advance covers the total, the bill is marked paid and the
    /// remainder goes back onto the standing credit for the next cycle.
    ///
    /// # Errors
    ///
    /// Lookup and persistence failures are logged with the tenant id and
    /// propagated, never swallowed.
    pub async fn generate_for_tenant(
        &self,
        tenant: &ActiveTenant,
        period: BillingPeriod,
        due_date: NaiveDate,
    ) -> Result<Bill, BillingError> {
        let tenant_id = tenant.tenant_id();
        let _guard = self.locks.acquire(tenant_id).await;

        match self.generate_locked(tenant, period, due_date).await {
            Ok(bill) => Ok(bill),
            Err(e) => {
                error!(%tenant_id, %period, error = %e, "bill generation failed");
                Err(e)
            }
        }
    }

    /// Generation body; the caller holds the tenant lock
    async fn generate_locked(
        &self,
        tenant: &ActiveTenant,
        period: BillingPeriod,
        due_date: NaiveDate,
    ) -> Result<Bill, BillingError> {
        let tenant_id = tenant.tenant_id();

        if let Some(existing) = self.port.find_bill(tenant_id, period).await? {
            debug!(%tenant_id, %period, bill_id = %existing.id, "bill already exists");
            return Ok(existing);
        }

        // The batch snapshot may be stale by the time the lock is held
        let mut account = self
            .port
            .find_account(tenant_id)
            .await?
            .ok_or(BillingError::TenantNotFound(tenant_id))?;

        let currency = tenant.base_rent.currency();
        let zero = Money::zero(currency);

        let prior = self.port.find_previous_bill(tenant_id, period).await?;
        let previous_balance = match &prior {
            Some(bill) if !bill.is_paid => bill.total.saturating_sub(&bill.advance_payment),
            _ => zero,
        };
        let leftover_advance = match &prior {
            Some(bill) => bill.advance_payment.saturating_sub(&bill.total),
            None => zero,
        };

        let standing_credit = account.take_standing_credit();
        let advance_payment = leftover_advance + standing_credit;

        let components = BillComponents {
            rent: tenant.base_rent,
            utilities: self.utility_seed.initial_charges(&account, currency),
            other_charges: zero,
            previous_balance,
            advance_payment,
        };
        let mut bill = Bill::new(
            tenant_id,
            account.apartment_id,
            period,
            due_date,
            components,
        );

        if advance_payment >= bill.total {
            bill.mark_paid();
            // The part of the advance the charges did not use carries into
            // the next cycle
            let remainder = advance_payment.saturating_sub(&charges::gross(&bill.components()));
            account.set_standing_credit(remainder);
        }

        // Bill before account: an unsaved bill must not consume the credit
        self.port.save_bill(&bill).await?;
        self.port.update_account(&account).await?;

        info!(
            %tenant_id,
            %period,
            bill_id = %bill.id,
            total = %bill.total,
            advance = %bill.advance_payment,
            paid = bill.is_paid,
            "generated bill"
        );
        Ok(bill)
    }
}
