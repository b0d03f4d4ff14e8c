//! Core Kernel - Foundational types for the rent ledger
//!
//! This crate provides the building blocks shared by the billing domain:
//! - Money types with precise decimal arithmetic
//! - Billing periods and an injectable clock
//! - Strongly-typed identifiers
//! - Port error types for external collaborators

pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use identifiers::{ApartmentId, BillId, BillingRunId, ChargeId, PaymentId, TenantId};
pub use money::{Currency, Money, MoneyError};
pub use ports::{DomainPort, PortError};
pub use temporal::{BillingPeriod, Clock, FixedClock, PeriodError, SystemClock};
