//! Billing Domain - Rent Ledger Engine
//!
//! This crate turns a tenant's monthly charges, prior balances, and advance
//! credit into a single authoritative bill, and nets out the tenant's
//! account (outstanding debt, standing credit, security deposit) when the
//! tenancy ends.
//!
//! # Invariants
//!
//! - `total = max(0, rent + utilities + other charges + previous balance - advance)`
//! - At most one bill per tenant and billing period
//! - Standing credit is never negative and is consumed exactly once per cycle
//!
//! Persistence and transport are external collaborators behind
//! [`ports::BillingPort`]; all operations touching a single tenant's ledger
//! serialize on that tenant's lock.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingEngine, BillingConfig};
//!
//! let engine = BillingEngine::new(port, clock, BillingConfig::default());
//! let report = engine.generate_monthly_bills().await?;
//! for failure in &report.failures {
//!     tracing::warn!(tenant_id = %failure.tenant_id, "generation failed");
//! }
//! ```

pub mod account;
pub mod bill;
pub mod charges;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod locks;
pub mod other_charge;
pub mod payment;
pub mod ports;
pub mod scheduler;
pub mod settlement;

pub use account::{LedgerAccount, TenancyStatus, UtilityServices};
pub use bill::{Bill, UtilityCharges};
pub use charges::BillComponents;
pub use config::BillingConfig;
pub use engine::BillingEngine;
pub use error::BillingError;
pub use generation::{BillFactory, UtilitySeed, ZeroUtilitySeed};
pub use locks::TenantLocks;
pub use other_charge::{ChargeRemoval, NewCharge, OtherCharge, OtherChargeLedger};
pub use payment::{Payment, PaymentMethod, PaymentProcessor, RecordPaymentRequest};
pub use ports::{ActiveTenant, BillingPort};
pub use scheduler::{BillingCycleScheduler, BillingRunReport, TenantFailure};
pub use settlement::{SettlementCalculator, SettlementRequest, SettlementView};
