//! The billing engine facade
//!
//! Wires the services over one port, one clock, and one shared set of
//! tenant locks, and exposes the core's whole surface in a single place.
//! Callers that only need part of the surface can construct the individual
//! services instead.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{BillId, BillingPeriod, ChargeId, Clock, TenantId};

use crate::bill::Bill;
use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::generation::{BillFactory, UtilitySeed};
use crate::locks::TenantLocks;
use crate::other_charge::{ChargeRemoval, NewCharge, OtherChargeLedger};
use crate::payment::{Payment, PaymentProcessor, RecordPaymentRequest};
use crate::ports::{ActiveTenant, BillingPort};
use crate::scheduler::{BillingCycleScheduler, BillingRunReport};
use crate::settlement::{SettlementCalculator, SettlementRequest, SettlementView};

/// Everything the billing core exposes, behind one constructor
pub struct BillingEngine {
    factory: Arc<BillFactory>,
    scheduler: BillingCycleScheduler,
    charges: OtherChargeLedger,
    payments: PaymentProcessor,
    settlement: SettlementCalculator,
}

impl BillingEngine {
    pub fn new(port: Arc<dyn BillingPort>, clock: Arc<dyn Clock>, config: BillingConfig) -> Self {
        Self::with_factory(port, clock, config, BillFactory::new)
    }

    /// Like [`BillingEngine::new`], with a custom utility seed on the factory
    pub fn with_utility_seed(
        port: Arc<dyn BillingPort>,
        clock: Arc<dyn Clock>,
        config: BillingConfig,
        seed: Arc<dyn UtilitySeed>,
    ) -> Self {
        Self::with_factory(port, clock, config, move |port, locks| {
            BillFactory::new(port, locks).with_utility_seed(seed)
        })
    }

    fn with_factory(
        port: Arc<dyn BillingPort>,
        clock: Arc<dyn Clock>,
        config: BillingConfig,
        make_factory: impl FnOnce(Arc<dyn BillingPort>, Arc<TenantLocks>) -> BillFactory,
    ) -> Self {
        let locks = Arc::new(TenantLocks::new());
        let factory = Arc::new(make_factory(Arc::clone(&port), Arc::clone(&locks)));
        Self {
            factory: Arc::clone(&factory),
            scheduler: BillingCycleScheduler::new(
                Arc::clone(&port),
                factory,
                Arc::clone(&clock),
                config,
            ),
            charges: OtherChargeLedger::new(Arc::clone(&port)),
            payments: PaymentProcessor::new(
                Arc::clone(&port),
                Arc::clone(&locks),
                Arc::clone(&clock),
            ),
            settlement: SettlementCalculator::new(port, locks),
        }
    }

    /// Runs the scheduled monthly cycle
    pub async fn generate_monthly_bills(&self) -> Result<BillingRunReport, BillingError> {
        self.scheduler.run_monthly().await
    }

    /// Generates (or returns) the bill for one tenant and month
    pub async fn generate_bill_for_tenant(
        &self,
        tenant: &ActiveTenant,
        year: i32,
        month: u32,
        due_date: NaiveDate,
    ) -> Result<Bill, BillingError> {
        let period = BillingPeriod::new(year, month)?;
        self.factory.generate_for_tenant(tenant, period, due_date).await
    }

    /// Runs an administrative cycle for a named month
    pub async fn generate_bills_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<BillingRunReport, BillingError> {
        self.scheduler.generate_for_month(year, month).await
    }

    /// Attaches an ad hoc charge to a bill
    pub async fn add_other_charge(
        &self,
        bill_id: BillId,
        charge: NewCharge,
    ) -> Result<Bill, BillingError> {
        self.charges.add_charge(bill_id, charge).await
    }

    /// Detaches an ad hoc charge from a bill
    pub async fn remove_other_charge(
        &self,
        bill_id: BillId,
        charge_id: ChargeId,
    ) -> Result<ChargeRemoval, BillingError> {
        self.charges.remove_charge(bill_id, charge_id).await
    }

    /// Records a payment and reconciles the standing credit
    pub async fn record_payment(
        &self,
        request: RecordPaymentRequest,
    ) -> Result<Payment, BillingError> {
        self.payments.record_payment(request).await
    }

    /// Computes closure figures without committing
    pub async fn preview_closure(
        &self,
        tenant_id: TenantId,
        request: SettlementRequest,
    ) -> Result<SettlementView, BillingError> {
        self.settlement.preview_closure(tenant_id, request).await
    }

    /// Commits the tenancy closure
    pub async fn process_closure(
        &self,
        tenant_id: TenantId,
        request: SettlementRequest,
    ) -> Result<SettlementView, BillingError> {
        self.settlement.process_closure(tenant_id, request).await
    }
}
