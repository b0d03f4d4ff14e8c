//! Billing domain errors

use core_kernel::{BillId, MoneyError, PeriodError, PortError, TenantId};
use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Tenant ledger account not found
    #[error("Tenant not found: {0}")]
    TenantNotFound(TenantId),

    /// Bill not found
    #[error("Bill not found: {0}")]
    BillNotFound(BillId),

    /// Input rejected before any computation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Closure requested for a tenancy that is already closed
    #[error("Tenancy already closed for tenant {0}")]
    TenancyClosed(TenantId),

    /// Monetary arithmetic error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Invalid billing period
    #[error("Billing period error: {0}")]
    Period(#[from] PeriodError),

    /// Failure reported by an external collaborator
    #[error("Port error: {0}")]
    Port(#[from] PortError),
}

impl BillingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }
}
