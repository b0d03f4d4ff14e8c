//! Billing cycle runs
//!
//! Drives the bill factory across all active tenants, either on the
//! monthly cadence or on demand for a named month. The period and due date
//! always come in from the clock or the caller; the scheduler never reads
//! wall-clock time on its own.

use std::sync::Arc;
use tracing::{info, warn};

use chrono::{Duration, NaiveDate};
use core_kernel::{BillingPeriod, BillingRunId, Clock, TenantId};

use crate::bill::Bill;
use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::generation::BillFactory;
use crate::ports::BillingPort;

/// A tenant whose generation failed during a run
#[derive(Debug, Clone)]
pub struct TenantFailure {
    pub tenant_id: TenantId,
    pub error: String,
}

/// Outcome of one billing run
///
/// `bills` holds every bill the run touched, including pre-existing ones
/// returned unchanged by idempotent generation. Failures are isolated per
/// tenant; one tenant's error never aborts the rest of the batch.
#[derive(Debug, Clone)]
pub struct BillingRunReport {
    pub run_id: BillingRunId,
    pub period: BillingPeriod,
    pub due_date: NaiveDate,
    pub bills: Vec<Bill>,
    pub failures: Vec<TenantFailure>,
}

impl BillingRunReport {
    /// True when every tenant was billed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives bill generation across all active tenants
pub struct BillingCycleScheduler {
    port: Arc<dyn BillingPort>,
    factory: Arc<BillFactory>,
    clock: Arc<dyn Clock>,
    config: BillingConfig,
}

impl BillingCycleScheduler {
    pub fn new(
        port: Arc<dyn BillingPort>,
        factory: Arc<BillFactory>,
        clock: Arc<dyn Clock>,
        config: BillingConfig,
    ) -> Self {
        Self {
            port,
            factory,
            clock,
            config,
        }
    }

    /// The scheduled monthly run
    ///
    /// Bills the clock's current period with a due date a configured
    /// number of days from today (ten by default).
    pub async fn run_monthly(&self) -> Result<BillingRunReport, BillingError> {
        let period = self.clock.current_period();
        let due_date = self.clock.today() + Duration::days(self.config.scheduled_due_offset_days);
        self.run(period, due_date).await
    }

    /// The administrative run for a named month
    ///
    /// The due date is anchored on a day of the target month (the tenth by
    /// default). This is a different policy than the scheduled path, so
    /// callers picking between the two get different due dates for the same
    /// month.
    pub async fn generate_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<BillingRunReport, BillingError> {
        let period = BillingPeriod::new(year, month)?;
        let due_date = period.day(self.config.manual_due_day)?;
        self.run(period, due_date).await
    }

    async fn run(
        &self,
        period: BillingPeriod,
        due_date: NaiveDate,
    ) -> Result<BillingRunReport, BillingError> {
        let run_id = BillingRunId::new_v7();
        let tenants = self.port.find_active_tenants().await?;
        info!(%run_id, %period, tenants = tenants.len(), "starting billing run");

        let mut report = BillingRunReport {
            run_id,
            period,
            due_date,
            bills: Vec::with_capacity(tenants.len()),
            failures: Vec::new(),
        };

        for tenant in &tenants {
            match self.factory.generate_for_tenant(tenant, period, due_date).await {
                Ok(bill) => report.bills.push(bill),
                Err(e) => {
                    let tenant_id = tenant.tenant_id();
                    warn!(%tenant_id, %period, error = %e, "bill generation failed, continuing batch");
                    report.failures.push(TenantFailure {
                        tenant_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            %run_id,
            %period,
            bills = report.bills.len(),
            failures = report.failures.len(),
            "billing run completed"
        );
        Ok(report)
    }
}
