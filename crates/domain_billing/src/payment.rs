//! Payment recording and advance reconciliation
//!
//! Payments are immutable history once recorded. Each recording captures a
//! point-in-time `remaining_balance` snapshot and, in the same tenant-locked
//! unit of work, reconciles the tenant's standing credit against the full
//! bill and payment history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use core_kernel::{Clock, Money, PaymentId, TenantId};

use crate::account::LedgerAccount;
use crate::error::BillingError;
use crate::locks::TenantLocks;
use crate::ports::BillingPort;

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Check,
    CreditCard,
    MobileWallet,
}

/// A recorded payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Paying tenant
    pub tenant_id: TenantId,
    /// Amount paid
    pub amount: Money,
    /// Date the payment was made
    pub paid_on: NaiveDate,
    /// Unpaid balance remaining at the time of this payment
    ///
    /// A snapshot, not a running per-bill ledger.
    pub remaining_balance: Money,
    /// Payment method
    pub method: PaymentMethod,
    /// External reference (bank ref, receipt number)
    pub reference: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for recording a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub tenant_id: TenantId,
    pub amount: Money,
    /// Defaults to the clock's current date when absent
    pub paid_on: Option<NaiveDate>,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

/// Records payments and keeps the standing credit reconciled
pub struct PaymentProcessor {
    port: Arc<dyn BillingPort>,
    locks: Arc<TenantLocks>,
    clock: Arc<dyn Clock>,
}

impl PaymentProcessor {
    pub fn new(port: Arc<dyn BillingPort>, locks: Arc<TenantLocks>, clock: Arc<dyn Clock>) -> Self {
        Self { port, locks, clock }
    }

    /// Records a payment for a tenant
    ///
    /// Computes `remaining_balance = max(0, unpaid bill totals - amount)`,
    /// persists the payment, and reconciles the standing credit before the
    /// tenant lock is released.
    ///
    /// # Errors
    ///
    /// - [`BillingError::Validation`] for a non-positive amount
    /// - [`BillingError::TenantNotFound`] when the tenant does not exist
    pub async fn record_payment(
        &self,
        request: RecordPaymentRequest,
    ) -> Result<Payment, BillingError> {
        if !request.amount.is_positive() {
            return Err(BillingError::validation("payment amount must be positive"));
        }

        let _guard = self.locks.acquire(request.tenant_id).await;

        let account = self
            .port
            .find_account(request.tenant_id)
            .await?
            .ok_or(BillingError::TenantNotFound(request.tenant_id))?;

        let unpaid = self.port.find_unpaid_bills(request.tenant_id).await?;
        let owed = unpaid
            .iter()
            .fold(Money::zero(request.amount.currency()), |acc, b| {
                acc + b.total
            });
        let remaining_balance = owed.saturating_sub(&request.amount);

        let payment = Payment {
            id: PaymentId::new_v7(),
            tenant_id: request.tenant_id,
            amount: request.amount,
            paid_on: request.paid_on.unwrap_or_else(|| self.clock.today()),
            remaining_balance,
            method: request.method,
            reference: request.reference,
            created_at: Utc::now(),
        };
        self.port.save_payment(&payment).await?;

        self.reconcile_locked(account).await?;

        info!(
            tenant_id = %payment.tenant_id,
            payment_id = %payment.id,
            amount = %payment.amount,
            remaining = %payment.remaining_balance,
            "recorded payment"
        );
        Ok(payment)
    }

    /// Recomputes the tenant's standing credit from history
    ///
    /// Returns the surplus that was written (zero when the tenant is not in
    /// surplus). Walks the full bill and payment history, so cost grows
    /// with account age.
    pub async fn reconcile_advance(&self, tenant_id: TenantId) -> Result<Money, BillingError> {
        let _guard = self.locks.acquire(tenant_id).await;
        let account = self
            .port
            .find_account(tenant_id)
            .await?
            .ok_or(BillingError::TenantNotFound(tenant_id))?;
        self.reconcile_locked(account).await
    }

    /// Reconciliation body; the caller holds the tenant lock
    async fn reconcile_locked(&self, mut account: LedgerAccount) -> Result<Money, BillingError> {
        let currency = account.advance_payment.currency();

        let payments = self.port.find_all_payments(account.tenant_id).await?;
        let paid = payments
            .iter()
            .fold(Money::zero(currency), |acc, p| acc + p.amount);

        let bills = self.port.find_all_bills(account.tenant_id).await?;
        let billed = bills
            .iter()
            .fold(Money::zero(currency), |acc, b| acc + b.total);

        let surplus = paid.saturating_sub(&billed);
        if surplus.is_positive() {
            account.set_standing_credit(surplus);
            self.port.update_account(&account).await?;
            info!(
                tenant_id = %account.tenant_id,
                surplus = %surplus,
                "reconciled overpayment into standing credit"
            );
        }
        Ok(surplus)
    }
}
