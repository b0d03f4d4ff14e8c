//! Billing periods and clock injection
//!
//! A billing period is a calendar month; bills are unique per tenant and
//! period, and carryover walks backwards one period at a time. The clock is
//! a trait so scheduled runs never read wall-clock time directly.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to billing periods
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Month {0} is outside the valid range 1-12")]
    MonthOutOfRange(u32),

    #[error("Year {year} is below the floor {floor}")]
    YearBelowFloor { year: i32, floor: i32 },

    #[error("Day {day} does not exist in {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
}

/// A calendar month in which bills are issued
///
/// Construction validates the month range and a year floor, so a period in
/// hand is always well-formed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    /// Earliest year accepted when constructing a period
    pub const YEAR_FLOOR: i32 = 2000;

    /// Creates a validated billing period
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange(month));
        }
        if year < Self::YEAR_FLOOR {
            return Err(PeriodError::YearBelowFloor {
                year,
                floor: Self::YEAR_FLOOR,
            });
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The immediately preceding period
    ///
    /// January wraps to December of the previous year. The result is not
    /// re-checked against the year floor: carryover lookups may walk one
    /// period before the floor and simply find no bill there.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// A specific day within this period
    pub fn day(&self, day: u32) -> Result<NaiveDate, PeriodError> {
        NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or(PeriodError::InvalidDay {
            year: self.year,
            month: self.month,
            day,
        })
    }

    /// First day of the period
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("day 1 exists in every validated period")
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Time source for scheduled billing runs
///
/// Production uses [`SystemClock`]; tests pin time with [`FixedClock`].
pub trait Clock: Send + Sync {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;

    /// The current date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// The billing period containing the current date
    fn current_period(&self) -> BillingPeriod {
        BillingPeriod::from_date(self.today())
    }
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_validation() {
        assert!(BillingPeriod::new(2024, 3).is_ok());
        assert_eq!(
            BillingPeriod::new(2024, 0),
            Err(PeriodError::MonthOutOfRange(0))
        );
        assert_eq!(
            BillingPeriod::new(2024, 13),
            Err(PeriodError::MonthOutOfRange(13))
        );
        assert_eq!(
            BillingPeriod::new(1999, 5),
            Err(PeriodError::YearBelowFloor {
                year: 1999,
                floor: 2000
            })
        );
    }

    #[test]
    fn test_previous_mid_year() {
        let march = BillingPeriod::new(2024, 3).unwrap();
        let feb = march.previous();
        assert_eq!(feb.year(), 2024);
        assert_eq!(feb.month(), 2);
    }

    #[test]
    fn test_previous_january_wraps_to_december() {
        let jan = BillingPeriod::new(2024, 1).unwrap();
        let dec = jan.previous();
        assert_eq!(dec.year(), 2023);
        assert_eq!(dec.month(), 12);
    }

    #[test]
    fn test_day_lookup() {
        let feb = BillingPeriod::new(2023, 2).unwrap();
        assert!(feb.day(10).is_ok());
        assert!(matches!(feb.day(30), Err(PeriodError::InvalidDay { .. })));
    }

    #[test]
    fn test_period_ordering() {
        let a = BillingPeriod::new(2023, 12).unwrap();
        let b = BillingPeriod::new(2024, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_fixed_clock_period() {
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap());
        let period = clock.current_period();
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 6);
    }
}
