//! Billing Domain Ports
//!
//! The port trait is the collaborator surface of the billing core: tenant
//! and apartment lookups, bill and payment persistence, charge storage.
//! Adapters implement it over whatever the application actually uses (a
//! relational store in production, the in-memory mock in tests).
//!
//! The port performs single reads and writes only; sequencing and
//! per-tenant serialization are the domain services' responsibility (see
//! [`crate::locks::TenantLocks`]).

use async_trait::async_trait;

use core_kernel::{BillId, BillingPeriod, ChargeId, DomainPort, Money, PortError, TenantId};

use crate::account::LedgerAccount;
use crate::bill::Bill;
use crate::other_charge::OtherCharge;
use crate::payment::Payment;

/// An active tenant joined with the apartment data billing needs
#[derive(Debug, Clone)]
pub struct ActiveTenant {
    /// The tenant's ledger account
    pub account: LedgerAccount,
    /// The apartment's full monthly rent
    pub base_rent: Money,
}

impl ActiveTenant {
    pub fn tenant_id(&self) -> TenantId {
        self.account.tenant_id
    }
}

/// The main port trait for billing domain operations
///
/// All methods are async and return `Result<T, PortError>` so adapters
/// surface NotFound and transport failures uniformly.
#[async_trait]
pub trait BillingPort: DomainPort {
    /// All active tenants with their apartment data
    async fn find_active_tenants(&self) -> Result<Vec<ActiveTenant>, PortError>;

    /// A tenant's ledger account, if the tenant exists
    async fn find_account(&self, tenant_id: TenantId) -> Result<Option<LedgerAccount>, PortError>;

    /// Persists a mutated ledger account in one update
    async fn update_account(&self, account: &LedgerAccount) -> Result<(), PortError>;

    /// The bill for a tenant and period, if one was generated
    async fn find_bill(
        &self,
        tenant_id: TenantId,
        period: BillingPeriod,
    ) -> Result<Option<Bill>, PortError>;

    /// A bill by its identifier
    async fn find_bill_by_id(&self, bill_id: BillId) -> Result<Option<Bill>, PortError>;

    /// The bill for the period immediately preceding the given one
    async fn find_previous_bill(
        &self,
        tenant_id: TenantId,
        period: BillingPeriod,
    ) -> Result<Option<Bill>, PortError>;

    /// Persists a newly generated bill
    ///
    /// Adapters reject a second bill for the same tenant and period with
    /// [`PortError::Conflict`].
    async fn save_bill(&self, bill: &Bill) -> Result<(), PortError>;

    /// Persists a mutated bill in one update
    async fn update_bill(&self, bill: &Bill) -> Result<(), PortError>;

    /// All of a tenant's unpaid bills
    async fn find_unpaid_bills(&self, tenant_id: TenantId) -> Result<Vec<Bill>, PortError>;

    /// A tenant's full bill history
    async fn find_all_bills(&self, tenant_id: TenantId) -> Result<Vec<Bill>, PortError>;

    /// Persists a payment record
    async fn save_payment(&self, payment: &Payment) -> Result<(), PortError>;

    /// A tenant's full payment history
    async fn find_all_payments(&self, tenant_id: TenantId) -> Result<Vec<Payment>, PortError>;

    /// All ad hoc charges attached to a bill
    async fn find_charges(&self, bill_id: BillId) -> Result<Vec<OtherCharge>, PortError>;

    /// Persists an ad hoc charge
    async fn save_charge(&self, charge: &OtherCharge) -> Result<(), PortError>;

    /// Deletes a charge; returns false when it did not exist
    async fn delete_charge(&self, charge_id: ChargeId) -> Result<bool, PortError>;
}

/// In-memory implementation of BillingPort for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock adapter storing everything in hash maps
    #[derive(Debug, Default)]
    pub struct MockBillingPort {
        accounts: Arc<RwLock<HashMap<TenantId, LedgerAccount>>>,
        base_rents: Arc<RwLock<HashMap<TenantId, Money>>>,
        bills: Arc<RwLock<HashMap<BillId, Bill>>>,
        payments: Arc<RwLock<Vec<Payment>>>,
        charges: Arc<RwLock<HashMap<ChargeId, OtherCharge>>>,
    }

    impl MockBillingPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a tenant with its apartment's base rent
        pub async fn insert_tenant(&self, account: LedgerAccount, base_rent: Money) {
            self.base_rents
                .write()
                .await
                .insert(account.tenant_id, base_rent);
            self.accounts
                .write()
                .await
                .insert(account.tenant_id, account);
        }

        /// Seeds a pre-existing bill, for history setups
        pub async fn insert_bill(&self, bill: Bill) {
            self.bills.write().await.insert(bill.id, bill);
        }

        /// Seeds a pre-existing payment
        pub async fn insert_payment(&self, payment: Payment) {
            self.payments.write().await.push(payment);
        }
    }

    impl DomainPort for MockBillingPort {}

    #[async_trait]
    impl BillingPort for MockBillingPort {
        async fn find_active_tenants(&self) -> Result<Vec<ActiveTenant>, PortError> {
            let accounts = self.accounts.read().await;
            let rents = self.base_rents.read().await;
            let mut tenants: Vec<ActiveTenant> = accounts
                .values()
                .filter(|a| a.is_active())
                .filter_map(|a| {
                    rents.get(&a.tenant_id).map(|rent| ActiveTenant {
                        account: a.clone(),
                        base_rent: *rent,
                    })
                })
                .collect();
            // Deterministic batch order for tests
            tenants.sort_by_key(|t| t.account.tenant_id);
            Ok(tenants)
        }

        async fn find_account(
            &self,
            tenant_id: TenantId,
        ) -> Result<Option<LedgerAccount>, PortError> {
            Ok(self.accounts.read().await.get(&tenant_id).cloned())
        }

        async fn update_account(&self, account: &LedgerAccount) -> Result<(), PortError> {
            let mut accounts = self.accounts.write().await;
            if !accounts.contains_key(&account.tenant_id) {
                return Err(PortError::not_found("LedgerAccount", account.tenant_id));
            }
            accounts.insert(account.tenant_id, account.clone());
            Ok(())
        }

        async fn find_bill(
            &self,
            tenant_id: TenantId,
            period: BillingPeriod,
        ) -> Result<Option<Bill>, PortError> {
            Ok(self
                .bills
                .read()
                .await
                .values()
                .find(|b| b.tenant_id == tenant_id && b.period == period)
                .cloned())
        }

        async fn find_bill_by_id(&self, bill_id: BillId) -> Result<Option<Bill>, PortError> {
            Ok(self.bills.read().await.get(&bill_id).cloned())
        }

        async fn find_previous_bill(
            &self,
            tenant_id: TenantId,
            period: BillingPeriod,
        ) -> Result<Option<Bill>, PortError> {
            self.find_bill(tenant_id, period.previous()).await
        }

        async fn save_bill(&self, bill: &Bill) -> Result<(), PortError> {
            let mut bills = self.bills.write().await;
            let duplicate = bills
                .values()
                .any(|b| b.tenant_id == bill.tenant_id && b.period == bill.period);
            if duplicate {
                return Err(PortError::conflict(format!(
                    "bill already exists for tenant {} in {}",
                    bill.tenant_id, bill.period
                )));
            }
            bills.insert(bill.id, bill.clone());
            Ok(())
        }

        async fn update_bill(&self, bill: &Bill) -> Result<(), PortError> {
            let mut bills = self.bills.write().await;
            if !bills.contains_key(&bill.id) {
                return Err(PortError::not_found("Bill", bill.id));
            }
            bills.insert(bill.id, bill.clone());
            Ok(())
        }

        async fn find_unpaid_bills(&self, tenant_id: TenantId) -> Result<Vec<Bill>, PortError> {
            let mut bills: Vec<Bill> = self
                .bills
                .read()
                .await
                .values()
                .filter(|b| b.tenant_id == tenant_id && !b.is_paid)
                .cloned()
                .collect();
            bills.sort_by_key(|b| b.period);
            Ok(bills)
        }

        async fn find_all_bills(&self, tenant_id: TenantId) -> Result<Vec<Bill>, PortError> {
            let mut bills: Vec<Bill> = self
                .bills
                .read()
                .await
                .values()
                .filter(|b| b.tenant_id == tenant_id)
                .cloned()
                .collect();
            bills.sort_by_key(|b| b.period);
            Ok(bills)
        }

        async fn save_payment(&self, payment: &Payment) -> Result<(), PortError> {
            self.payments.write().await.push(payment.clone());
            Ok(())
        }

        async fn find_all_payments(&self, tenant_id: TenantId) -> Result<Vec<Payment>, PortError> {
            Ok(self
                .payments
                .read()
                .await
                .iter()
                .filter(|p| p.tenant_id == tenant_id)
                .cloned()
                .collect())
        }

        async fn find_charges(&self, bill_id: BillId) -> Result<Vec<OtherCharge>, PortError> {
            let mut charges: Vec<OtherCharge> = self
                .charges
                .read()
                .await
                .values()
                .filter(|c| c.bill_id == bill_id)
                .cloned()
                .collect();
            charges.sort_by_key(|c| c.created_at);
            Ok(charges)
        }

        async fn save_charge(&self, charge: &OtherCharge) -> Result<(), PortError> {
            self.charges.write().await.insert(charge.id, charge.clone());
            Ok(())
        }

        async fn delete_charge(&self, charge_id: ChargeId) -> Result<bool, PortError> {
            Ok(self.charges.write().await.remove(&charge_id).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockBillingPort;
    use super::*;
    use crate::charges::BillComponents;
    use core_kernel::{ApartmentId, Currency};
    use rust_decimal_macros::dec;

    fn account() -> LedgerAccount {
        LedgerAccount::new(TenantId::new(), ApartmentId::new(), Currency::USD)
    }

    #[tokio::test]
    async fn test_active_tenants_excludes_closed() {
        let port = MockBillingPort::new();
        let active = account();
        let mut closed = account();
        closed.close();

        let rent = Money::new(dec!(1000), Currency::USD);
        port.insert_tenant(active.clone(), rent).await;
        port.insert_tenant(closed, rent).await;

        let tenants = port.find_active_tenants().await.unwrap();
        assert_eq!(tenants.len(), 1);
        assert_eq!(tenants[0].tenant_id(), active.tenant_id);
    }

    #[tokio::test]
    async fn test_save_bill_rejects_duplicate_period() {
        let port = MockBillingPort::new();
        let tenant_id = TenantId::new();
        let apartment_id = ApartmentId::new();
        let period = BillingPeriod::new(2024, 3).unwrap();
        let components = BillComponents::rent_only(Money::new(dec!(900), Currency::USD));

        let first = Bill::new(
            tenant_id,
            apartment_id,
            period,
            period.day(10).unwrap(),
            components,
        );
        let second = Bill::new(
            tenant_id,
            apartment_id,
            period,
            period.day(10).unwrap(),
            components,
        );

        port.save_bill(&first).await.unwrap();
        let err = port.save_bill(&second).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_account_requires_existing() {
        let port = MockBillingPort::new();
        let err = port.update_account(&account()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
