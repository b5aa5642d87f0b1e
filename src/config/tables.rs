//! In-memory rate tables.
//!
//! [`RateTables`] holds every reference table the calculator needs and
//! answers [`RateLookup`] queries against them. Tables are normally loaded by
//! [`super::ConfigLoader`], but can be assembled directly.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::{ReconError, ReconResult};
use crate::lookup::{LookupResult, RateLookup, StateTaxRule, TaxParameters};
use crate::models::PayGrade;

use super::types::{BasePayStep, BasePayTable, LocationRateRow, PremiumRow, StateTaxRow};

/// The complete set of reference tables.
#[derive(Debug, Clone, Default)]
pub struct RateTables {
    /// Base pay tables sorted oldest first.
    base_pay: Vec<BasePayTable>,
    housing: Vec<LocationRateRow>,
    cola: Vec<LocationRateRow>,
    premiums: Vec<PremiumRow>,
    /// Tax parameters sorted by year.
    tax: Vec<TaxParameters>,
    state_tax: Vec<StateTaxRow>,
}

impl RateTables {
    /// Creates rate tables from their component parts.
    ///
    /// Grade codes are normalized (so `E5` and `E05` match), location keys and
    /// state codes are upper-cased, and base pay tables and steps are sorted.
    /// Returns `InvalidProfile` if a grade code in any table is unrecognized.
    pub fn new(
        base_pay: Vec<BasePayTable>,
        housing: Vec<LocationRateRow>,
        cola: Vec<LocationRateRow>,
        premiums: Vec<PremiumRow>,
        tax: Vec<TaxParameters>,
        state_tax: Vec<StateTaxRow>,
    ) -> ReconResult<Self> {
        let mut sorted_base_pay = Vec::with_capacity(base_pay.len());
        for table in base_pay {
            let mut grades = HashMap::with_capacity(table.grades.len());
            for (code, mut steps) in table.grades {
                steps.sort_by_key(|s| s.years);
                grades.insert(PayGrade::parse(&code)?.to_string(), steps);
            }
            sorted_base_pay.push(BasePayTable {
                effective_date: table.effective_date,
                grades,
            });
        }
        sorted_base_pay.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));

        let mut tax = tax;
        tax.sort_by_key(|t| t.year);

        let mut state_tax = state_tax;
        for row in &mut state_tax {
            row.state = normalize_key(&row.state);
        }

        Ok(Self {
            base_pay: sorted_base_pay,
            housing: normalize_location_rows(housing)?,
            cola: normalize_location_rows(cola)?,
            premiums,
            tax,
            state_tax,
        })
    }

    /// Returns the base pay tables, oldest first.
    pub fn base_pay_tables(&self) -> &[BasePayTable] {
        &self.base_pay
    }

    /// Returns the years of tax parameters available.
    pub fn tax_years(&self) -> Vec<i32> {
        self.tax.iter().map(|t| t.year).collect()
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

fn normalize_location_rows(rows: Vec<LocationRateRow>) -> ReconResult<Vec<LocationRateRow>> {
    rows.into_iter()
        .map(|row| {
            Ok(LocationRateRow {
                grade: PayGrade::parse(&row.grade)?.to_string(),
                location: normalize_key(&row.location),
                ..row
            })
        })
        .collect()
}

/// Rejects negative stored amounts, which indicate a corrupt table.
fn checked_amount(table: &str, cents: i64) -> LookupResult<i64> {
    if cents < 0 {
        return Err(ReconError::LookupFailed {
            table: table.to_string(),
            message: format!("stored amount {} is negative", cents),
        });
    }
    Ok(Some(cents))
}

/// Finds the most recent row matching grade, location and dependency status
/// that is effective on or before `as_of`.
fn latest_location_rate<'a>(
    rows: &'a [LocationRateRow],
    grade: &PayGrade,
    location_key: &str,
    with_dependents: bool,
    as_of: NaiveDate,
) -> Option<&'a LocationRateRow> {
    let grade = grade.to_string();
    let location = normalize_key(location_key);
    rows.iter()
        .filter(|r| {
            r.grade == grade
                && r.location == location
                && r.with_dependents == with_dependents
                && r.effective_date <= as_of
        })
        .max_by_key(|r| r.effective_date)
}

/// Selects the highest step whose `years` does not exceed `years_of_service`.
fn step_for(steps: &[BasePayStep], years_of_service: u32) -> Option<&BasePayStep> {
    steps.iter().rev().find(|s| s.years <= years_of_service)
}

impl RateLookup for RateTables {
    fn base_pay(
        &self,
        grade: &PayGrade,
        years_of_service: u32,
        as_of: NaiveDate,
    ) -> LookupResult<i64> {
        // Tables are sorted ascending, so the last qualifying one is the most recent
        let Some(table) = self.base_pay.iter().rfind(|t| t.effective_date <= as_of) else {
            return Ok(None);
        };

        match table
            .grades
            .get(&grade.to_string())
            .and_then(|steps| step_for(steps, years_of_service))
        {
            Some(step) => checked_amount("base_pay", step.monthly_cents),
            None => Ok(None),
        }
    }

    fn housing_rate(
        &self,
        grade: &PayGrade,
        location_key: &str,
        with_dependents: bool,
        as_of: NaiveDate,
    ) -> LookupResult<i64> {
        match latest_location_rate(&self.housing, grade, location_key, with_dependents, as_of) {
            Some(row) => checked_amount("housing", row.monthly_cents),
            None => Ok(None),
        }
    }

    fn cola_rate(
        &self,
        location_key: &str,
        grade: &PayGrade,
        with_dependents: bool,
        as_of: NaiveDate,
    ) -> LookupResult<i64> {
        match latest_location_rate(&self.cola, grade, location_key, with_dependents, as_of) {
            Some(row) => checked_amount("cola", row.monthly_cents),
            None => Ok(None),
        }
    }

    fn insurance_premium(&self, coverage_cents: i64) -> LookupResult<i64> {
        match self
            .premiums
            .iter()
            .find(|p| p.coverage_cents == coverage_cents)
        {
            Some(row) => checked_amount("sgli", row.premium_cents),
            None => Ok(None),
        }
    }

    fn tax_parameters(&self, year: i32) -> LookupResult<TaxParameters> {
        Ok(self.tax.iter().find(|t| t.year == year).cloned())
    }

    fn state_tax_rule(&self, state: &str, year: i32) -> LookupResult<StateTaxRule> {
        let state = normalize_key(state);
        // A state's rule stays in force until a later year replaces it
        Ok(self
            .state_tax
            .iter()
            .filter(|r| r.state == state && r.year <= year)
            .max_by_key(|r| r.year)
            .map(|r| r.rule.clone()))
    }
}
