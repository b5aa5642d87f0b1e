//! Rate lookup seam.
//!
//! The engine never fetches reference data itself. It asks a [`RateLookup`]
//! implementation for point lookups and treats "not found" as unknown, never
//! as zero. [`crate::config::RateTables`] is the YAML-backed implementation
//! shipped with this crate; callers may plug in their own.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ReconResult;
use crate::models::{FilingStatus, PayGrade};

/// The result of a single lookup.
///
/// `Ok(Some(v))` means found, `Ok(None)` means the table has no qualifying row,
/// and `Err` means the adapter itself failed.
pub type LookupResult<T> = ReconResult<Option<T>>;

/// One band of a coarse bracket schedule.
///
/// Bands are matched on annualized income: the first band whose `up_to_cents`
/// is at least the income applies its single `rate` to the whole amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    /// Inclusive annual upper bound in cents; `None` for the top band.
    #[serde(default)]
    pub up_to_cents: Option<i64>,
    /// Flat rate applied to the whole taxable amount (0.12 means 12%).
    pub rate: Decimal,
}

/// A coarse, non-marginal bracket schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    /// Annual standard deduction subtracted before band matching.
    #[serde(default)]
    pub standard_deduction_cents: i64,
    /// Bands in ascending order of `up_to_cents`.
    pub bands: Vec<TaxBand>,
}

impl BracketSchedule {
    /// Returns the band that covers `annual_cents`.
    pub fn band_for(&self, annual_cents: i64) -> Option<&TaxBand> {
        self.bands
            .iter()
            .find(|b| b.up_to_cents.is_none_or(|limit| annual_cents <= limit))
    }
}

/// Federal withholding schedules by filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTaxTable {
    /// Single filers.
    pub single: BracketSchedule,
    /// Married filing jointly.
    pub married_joint: BracketSchedule,
    /// Head of household.
    pub head_of_household: BracketSchedule,
}

impl FederalTaxTable {
    /// Returns the schedule for a filing status.
    pub fn schedule(&self, status: FilingStatus) -> &BracketSchedule {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedJoint => &self.married_joint,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }
}

/// Payroll tax parameters for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxParameters {
    /// The tax year these parameters apply to.
    pub year: i32,
    /// Social Security rate (0.062 means 6.2%).
    pub fica_rate: Decimal,
    /// Medicare rate.
    pub medicare_rate: Decimal,
    /// Annual Social Security wage base in cents.
    pub fica_wage_base_cents: i64,
    /// Coarse federal withholding schedules.
    pub federal: FederalTaxTable,
}

/// How a state taxes a resident member's pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateTaxRule {
    /// The state levies no income tax.
    NoIncomeTax,
    /// The state exempts active-duty military pay.
    MilitaryPayExempt,
    /// A single flat rate on taxable gross.
    Flat {
        /// The rate (0.0425 means 4.25%).
        rate: Decimal,
    },
    /// A coarse bracket schedule on annualized taxable gross.
    Banded(BracketSchedule),
}

/// Point lookups into reference rate data.
///
/// Implementations must return `Ok(None)` for absent rows and reserve `Err`
/// for genuine failures (corrupt table, unreachable store).
pub trait RateLookup {
    /// Monthly basic pay for a grade at the highest years-of-service step not
    /// above `years_of_service`, from the table in effect on `as_of`.
    fn base_pay(&self, grade: &PayGrade, years_of_service: u32, as_of: NaiveDate)
    -> LookupResult<i64>;

    /// Monthly housing allowance from the most recent row effective on or
    /// before `as_of`.
    fn housing_rate(
        &self,
        grade: &PayGrade,
        location_key: &str,
        with_dependents: bool,
        as_of: NaiveDate,
    ) -> LookupResult<i64>;

    /// Monthly cost-of-living allowance. `Ok(None)` means the location pays
    /// no COLA.
    fn cola_rate(
        &self,
        location_key: &str,
        grade: &PayGrade,
        with_dependents: bool,
        as_of: NaiveDate,
    ) -> LookupResult<i64>;

    /// Monthly life insurance premium for an exact coverage amount.
    fn insurance_premium(&self, coverage_cents: i64) -> LookupResult<i64>;

    /// Payroll tax parameters for a tax year.
    fn tax_parameters(&self, year: i32) -> LookupResult<TaxParameters>;

    /// State income tax rule for a state and tax year.
    fn state_tax_rule(&self, state: &str, year: i32) -> LookupResult<StateTaxRule>;
}
