//! Billing configuration

use serde::{Deserialize, Serialize};

/// Tunables for the billing cycle
///
/// The two due-date policies are intentionally different: scheduled runs
/// give tenants a fixed window from the run instant, while manual runs for
/// a named month anchor on a day of that month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Days between a scheduled run and the resulting due date
    pub scheduled_due_offset_days: i64,
    /// Day of the target month used as due date for manual runs
    pub manual_due_day: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            scheduled_due_offset_days: 10,
            manual_due_day: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BillingConfig::default();
        assert_eq!(config.scheduled_due_offset_days, 10);
        assert_eq!(config.manual_due_day, 10);
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: BillingConfig =
            serde_json::from_str(r#"{"scheduled_due_offset_days": 14, "manual_due_day": 5}"#)
                .unwrap();
        assert_eq!(config.scheduled_due_offset_days, 14);
        assert_eq!(config.manual_due_day, 5);
    }
}
