//! Tenancy settlement
//!
//! When a tenant vacates, the settlement nets outstanding debt, standing
//! credit, and the security deposit into a refund or a balance due.
//! Preview is pure; committing flips the tenancy `Active -> Closed` and
//! zeroes both balances in one account update. The computed figures are
//! returned to the caller only; the actual money movement happens outside
//! the ledger.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use core_kernel::{Money, TenantId};

use crate::account::LedgerAccount;
use crate::error::BillingError;
use crate::locks::TenantLocks;
use crate::ports::BillingPort;

/// Input for a settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// Deductions withheld from the security deposit (damages, cleaning)
    pub deposit_deductions: Money,
    /// Why the tenancy is being closed
    pub reason: Option<String>,
}

/// The netted result of a tenancy closure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementView {
    pub tenant_id: TenantId,
    /// Unpaid bill total net of payments
    pub outstanding: Money,
    /// Standing credit left after covering the outstanding amount
    pub remaining_advance: Money,
    /// Security deposit left after deductions
    pub remaining_deposit: Money,
    /// Refund owed to the tenant
    pub potential_refund: Money,
    /// Amount still owed by the tenant
    pub final_balance_due: Money,
    /// Deductions that were applied
    pub deposit_deductions: Money,
    pub reason: Option<String>,
}

/// Previews and commits tenancy closures
pub struct SettlementCalculator {
    port: Arc<dyn BillingPort>,
    locks: Arc<TenantLocks>,
}

impl SettlementCalculator {
    pub fn new(port: Arc<dyn BillingPort>, locks: Arc<TenantLocks>) -> Self {
        Self { port, locks }
    }

    /// Computes the closure figures without mutating anything
    ///
    /// # Errors
    ///
    /// - [`BillingError::TenantNotFound`] when the tenant does not exist
    /// - [`BillingError::Validation`] for negative deductions
    pub async fn preview_closure(
        &self,
        tenant_id: TenantId,
        request: SettlementRequest,
    ) -> Result<SettlementView, BillingError> {
        validate(&request)?;
        let account = self
            .port
            .find_account(tenant_id)
            .await?
            .ok_or(BillingError::TenantNotFound(tenant_id))?;
        self.compute(&account, request).await
    }

    /// Commits the closure: `Active -> Closed`, both balances zeroed
    ///
    /// All-or-nothing: the status flip and both zeroings travel in a single
    /// account update. A second invocation returns
    /// [`BillingError::TenancyClosed`] instead of recomputing against the
    /// already-zeroed ledger.
    pub async fn process_closure(
        &self,
        tenant_id: TenantId,
        request: SettlementRequest,
    ) -> Result<SettlementView, BillingError> {
        validate(&request)?;

        let _guard = self.locks.acquire(tenant_id).await;

        let mut account = self
            .port
            .find_account(tenant_id)
            .await?
            .ok_or(BillingError::TenantNotFound(tenant_id))?;
        if !account.is_active() {
            return Err(BillingError::TenancyClosed(tenant_id));
        }

        let view = self.compute(&account, request).await?;

        account.close();
        self.port.update_account(&account).await?;

        info!(
            tenant_id = %tenant_id,
            refund = %view.potential_refund,
            balance_due = %view.final_balance_due,
            "closed tenancy"
        );
        Ok(view)
    }

    /// The settlement arithmetic, shared by preview and commit
    async fn compute(
        &self,
        account: &LedgerAccount,
        request: SettlementRequest,
    ) -> Result<SettlementView, BillingError> {
        let currency = account.advance_payment.currency();

        let bills = self.port.find_all_bills(account.tenant_id).await?;
        let billed = bills
            .iter()
            .fold(Money::zero(currency), |acc, b| acc + b.total);

        let payments = self.port.find_all_payments(account.tenant_id).await?;
        let paid = payments
            .iter()
            .fold(Money::zero(currency), |acc, p| acc + p.amount);

        let outstanding = billed.saturating_sub(&paid);
        let remaining_advance = account.advance_payment.saturating_sub(&outstanding);
        let remaining_deposit = account
            .security_deposit
            .saturating_sub(&request.deposit_deductions);
        let potential_refund = remaining_advance + remaining_deposit;
        let final_balance_due = outstanding.saturating_sub(&account.advance_payment);

        Ok(SettlementView {
            tenant_id: account.tenant_id,
            outstanding,
            remaining_advance,
            remaining_deposit,
            potential_refund,
            final_balance_due,
            deposit_deductions: request.deposit_deductions,
            reason: request.reason,
        })
    }
}

fn validate(request: &SettlementRequest) -> Result<(), BillingError> {
    if request.deposit_deductions.is_negative() {
        return Err(BillingError::validation(
            "deposit deductions must not be negative",
        ));
    }
    Ok(())
}
