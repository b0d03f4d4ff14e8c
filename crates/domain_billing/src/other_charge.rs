//! Ad hoc charges
//!
//! An other charge is a non-recurring line item owned by exactly one bill.
//! The ledger keeps the owning bill's `other_charges` aggregate equal to
//! the sum of its charges at all times: every insert or delete recomputes
//! the aggregate and the bill total from a fresh snapshot and persists both
//! fields in a single bill update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use core_kernel::{BillId, ChargeId, Money};

use crate::bill::Bill;
use crate::error::BillingError;
use crate::ports::BillingPort;

/// A non-recurring charge attached to one bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherCharge {
    /// Unique identifier
    pub id: ChargeId,
    /// Owning bill
    pub bill_id: BillId,
    /// Short label, e.g. "Parking sticker"
    pub name: String,
    /// Charge amount
    pub amount: Money,
    /// Optional longer description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for attaching a charge to a bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCharge {
    pub name: String,
    pub amount: Money,
    pub description: Option<String>,
}

/// Outcome of a charge removal
///
/// A missing bill or charge is "nothing to do", not a failure, so removal
/// reports it as a signal instead of an error.
#[derive(Debug, Clone)]
pub enum ChargeRemoval {
    /// The charge was removed; the refreshed bill is returned
    Removed(Bill),
    /// The bill or the charge does not exist (or the charge belongs to a
    /// different bill)
    NotFound,
}

/// Attaches and detaches ad hoc charges, keeping bill totals consistent
pub struct OtherChargeLedger {
    port: Arc<dyn BillingPort>,
}

impl OtherChargeLedger {
    pub fn new(port: Arc<dyn BillingPort>) -> Self {
        Self { port }
    }

    /// Attaches a charge to a bill and refreshes the bill's totals
    ///
    /// # Errors
    ///
    /// - [`BillingError::BillNotFound`] when the bill does not exist
    /// - [`BillingError::Validation`] for an empty name or negative amount
    pub async fn add_charge(
        &self,
        bill_id: BillId,
        new_charge: NewCharge,
    ) -> Result<Bill, BillingError> {
        if new_charge.name.trim().is_empty() {
            return Err(BillingError::validation("charge name must not be empty"));
        }
        if new_charge.amount.is_negative() {
            return Err(BillingError::validation("charge amount must not be negative"));
        }

        let mut bill = self
            .port
            .find_bill_by_id(bill_id)
            .await?
            .ok_or(BillingError::BillNotFound(bill_id))?;

        let charge = OtherCharge {
            id: ChargeId::new_v7(),
            bill_id,
            name: new_charge.name,
            amount: new_charge.amount,
            description: new_charge.description,
            created_at: Utc::now(),
        };
        self.port.save_charge(&charge).await?;

        self.refresh_aggregate(&mut bill).await?;

        info!(
            bill_id = %bill.id,
            charge_id = %charge.id,
            amount = %charge.amount,
            total = %bill.total,
            "attached charge to bill"
        );
        Ok(bill)
    }

    /// Detaches a charge from a bill and refreshes the bill's totals
    ///
    /// Returns [`ChargeRemoval::NotFound`] when the bill or charge does not
    /// exist, or when the charge belongs to a different bill.
    pub async fn remove_charge(
        &self,
        bill_id: BillId,
        charge_id: ChargeId,
    ) -> Result<ChargeRemoval, BillingError> {
        let Some(mut bill) = self.port.find_bill_by_id(bill_id).await? else {
            return Ok(ChargeRemoval::NotFound);
        };

        let charges = self.port.find_charges(bill_id).await?;
        if !charges.iter().any(|c| c.id == charge_id) {
            return Ok(ChargeRemoval::NotFound);
        }

        if !self.port.delete_charge(charge_id).await? {
            return Ok(ChargeRemoval::NotFound);
        }

        self.refresh_aggregate(&mut bill).await?;

        info!(
            bill_id = %bill.id,
            charge_id = %charge_id,
            total = %bill.total,
            "detached charge from bill"
        );
        Ok(ChargeRemoval::Removed(bill))
    }

    /// Recomputes `other_charges` and `total` from the stored charges and
    /// persists both in one bill update
    async fn refresh_aggregate(&self, bill: &mut Bill) -> Result<(), BillingError> {
        let charges = self.port.find_charges(bill.id).await?;
        let aggregate = charges
            .iter()
            .fold(Money::zero(bill.currency()), |acc, c| acc + c.amount);

        bill.apply_other_charges(aggregate);
        self.port.update_bill(bill).await?;
        Ok(())
    }
}
