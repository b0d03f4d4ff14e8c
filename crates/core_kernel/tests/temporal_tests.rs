//! Billing period behavior across the public API

use chrono::NaiveDate;
use core_kernel::{BillingPeriod, Clock, FixedClock, PeriodError};

#[test]
fn previous_chain_walks_across_year_boundaries() {
    let mut period = BillingPeriod::new(2024, 2).unwrap();
    let mut seen = Vec::new();
    for _ in 0..4 {
        period = period.previous();
        seen.push((period.year(), period.month()));
    }
    assert_eq!(seen, vec![(2024, 1), (2023, 12), (2023, 11), (2023, 10)]);
}

#[test]
fn from_date_and_first_day_agree() {
    let date = NaiveDate::from_ymd_opt(2024, 7, 23).unwrap();
    let period = BillingPeriod::from_date(date);
    assert_eq!(
        period.first_day(),
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    );
}

#[test]
fn tenth_of_month_exists_in_every_period() {
    for month in 1..=12 {
        let period = BillingPeriod::new(2024, month).unwrap();
        assert!(period.day(10).is_ok());
    }
}

#[test]
fn invalid_day_is_reported_with_context() {
    let feb = BillingPeriod::new(2025, 2).unwrap();
    assert_eq!(
        feb.day(29),
        Err(PeriodError::InvalidDay {
            year: 2025,
            month: 2,
            day: 29
        })
    );
}

#[test]
fn fixed_clock_today_matches_instant() {
    use chrono::{TimeZone, Utc};
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap());
    assert_eq!(
        clock.today(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    );
}

#[test]
fn serde_round_trip() {
    let period = BillingPeriod::new(2024, 11).unwrap();
    let json = serde_json::to_string(&period).unwrap();
    let back: BillingPeriod = serde_json::from_str(&json).unwrap();
    assert_eq!(back, period);
}
