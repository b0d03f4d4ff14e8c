//! Typed identifiers
//!
//! Every entity id is its own newtype over a UUID, so the compiler rejects a
//! bill id where a tenant id belongs. Ids render with a short prefix
//! (`TEN-…`) and parse back with or without it, and order like their
//! underlying UUIDs, which gives batch runs a stable iteration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random (v4) identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// A fresh time-ordered (v7) identifier
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// A tenant, the owner of a ledger account
    TenantId,
    "TEN"
);
define_id!(
    /// An apartment, the source of the base rent
    ApartmentId,
    "APT"
);
define_id!(
    /// A monthly bill
    BillId,
    "BILL"
);
define_id!(
    /// An ad hoc charge attached to a bill
    ChargeId,
    "CHG"
);
define_id!(
    /// A recorded payment
    PaymentId,
    "PAY"
);
define_id!(
    /// One execution of the billing cycle
    BillingRunId,
    "RUN"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_prefix() {
        assert!(TenantId::new().to_string().starts_with("TEN-"));
        assert!(BillingRunId::new().to_string().starts_with("RUN-"));
    }

    #[test]
    fn test_parse_round_trips_prefixed_form() {
        let original = BillId::new_v7();
        let parsed: BillId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_accepts_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: ChargeId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed, ChargeId::from_uuid(uuid));
    }

    #[test]
    fn test_garbage_does_not_parse() {
        assert!("TEN-not-a-uuid".parse::<TenantId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = PaymentId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }

    #[test]
    fn test_uuid_conversions() {
        let uuid = Uuid::new_v4();
        let id = ApartmentId::from(uuid);
        assert_eq!(Uuid::from(id), uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }
}
