//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: the calendar month a
//! reconciliation is performed for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, ReconResult};

/// A monthly pay period identified by year and month.
///
/// Rate lookups use the last day of the month as their effective-date cutoff,
/// so a rate change published mid-month applies to that month.
///
/// # Example
///
/// ```
/// use pay_recon::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2024, 2).unwrap();
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(PayPeriod::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

impl PayPeriod {
    /// Creates a validated pay period.
    ///
    /// Returns `InvalidPeriod` if the month is outside 1-12 or the year is
    /// not positive.
    pub fn new(year: i32, month: u32) -> ReconResult<Self> {
        let period = Self { year, month };
        period.validate()?;
        Ok(period)
    }

    /// Checks that this period names a real calendar month.
    ///
    /// Periods arriving through deserialization bypass [`PayPeriod::new`], so
    /// the engine re-validates before using them.
    pub fn validate(&self) -> ReconResult<()> {
        if self.year < 1 || self.first_day_opt().is_none() {
            return Err(ReconError::InvalidPeriod {
                year: self.year,
                month: self.month,
            });
        }
        Ok(())
    }

    /// Returns the first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day_opt().unwrap_or(NaiveDate::MIN)
    }

    /// Returns the last day of the month, the effective-date cutoff for rate lookups.
    ///
    /// An invalid period yields `NaiveDate::MIN`; call [`PayPeriod::validate`]
    /// first.
    pub fn last_day(&self) -> NaiveDate {
        let next = if self.month == 12 {
            self.year.checked_add(1).map(|year| (year, 1))
        } else {
            self.month.checked_add(1).map(|month| (self.year, month))
        };
        next.and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MIN)
    }

    fn first_day_opt(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
