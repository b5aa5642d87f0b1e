//! Payroll tax estimates.
//!
//! FICA and Medicare follow statutory rates and are exact to the cent. Federal
//! and state income tax withholding is a coarse estimate: income is
//! annualized, reduced by the standard deduction, and taxed at the single rate
//! of the band it falls in. Real withholding is marginal and depends on W-4
//! elections, so these two figures are compared with wide tolerances.

use rust_decimal::Decimal;

use crate::error::{ReconError, ReconResult};
use crate::lookup::{BracketSchedule, StateTaxRule, TaxParameters};
use crate::models::FilingStatus;

use super::money::{apply_rate, round_cents};

const MONTHS_PER_YEAR: i64 = 12;

/// Social Security withholding on monthly taxable gross, capped at one
/// twelfth of the annual wage base.
pub fn fica_tax(taxable_gross_cents: i64, params: &TaxParameters) -> ReconResult<i64> {
    let monthly_cap = round_cents(
        Decimal::from(params.fica_wage_base_cents) / Decimal::from(MONTHS_PER_YEAR),
    )?;
    apply_rate(taxable_gross_cents.min(monthly_cap), params.fica_rate)
}

/// Medicare withholding on monthly taxable gross. Uncapped.
pub fn medicare_tax(taxable_gross_cents: i64, params: &TaxParameters) -> ReconResult<i64> {
    apply_rate(taxable_gross_cents, params.medicare_rate)
}

/// Coarse monthly withholding against a bracket schedule.
///
/// Annualizes `monthly_cents`, subtracts the standard deduction (never going
/// below zero) and applies the covering band's rate to the whole remainder.
///
/// Income the standard deduction absorbs owes nothing. Income above the last
/// band of a schedule without an open top band is a `LookupFailed` error.
pub fn coarse_monthly_estimate(
    monthly_cents: i64,
    schedule: &BracketSchedule,
) -> ReconResult<i64> {
    let annual = monthly_cents.saturating_mul(MONTHS_PER_YEAR);
    let taxable = annual
        .saturating_sub(schedule.standard_deduction_cents)
        .max(0);
    if taxable == 0 {
        return Ok(0);
    }

    let Some(band) = schedule.band_for(taxable) else {
        return Err(ReconError::LookupFailed {
            table: "tax".to_string(),
            message: format!("no band covers annual taxable income of {} cents", taxable),
        });
    };

    let annual_tax = Decimal::from(taxable)
        .checked_mul(band.rate)
        .ok_or_else(|| ReconError::CalculationError {
            message: format!("{} cents x {} overflowed", taxable, band.rate),
        })?;
    round_cents(annual_tax / Decimal::from(MONTHS_PER_YEAR))
}

/// Estimated federal income tax withholding.
pub fn federal_income_tax(
    taxable_gross_cents: i64,
    status: FilingStatus,
    params: &TaxParameters,
) -> ReconResult<i64> {
    coarse_monthly_estimate(taxable_gross_cents, params.federal.schedule(status))
}

/// Estimated state income tax withholding.
pub fn state_income_tax(taxable_gross_cents: i64, rule: &StateTaxRule) -> ReconResult<i64> {
    match rule {
        StateTaxRule::NoIncomeTax | StateTaxRule::MilitaryPayExempt => Ok(0),
        StateTaxRule::Flat { rate } => apply_rate(taxable_gross_cents, *rate),
        StateTaxRule::Banded(schedule) => coarse_monthly_estimate(taxable_gross_cents, schedule),
    }
}
