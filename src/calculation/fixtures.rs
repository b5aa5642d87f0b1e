//! Shared test fixtures for calculation tests.

use rust_decimal::Decimal;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ReconError;
use crate::lookup::{
    BracketSchedule, FederalTaxTable, LookupResult, RateLookup, StateTaxRule, TaxBand,
    TaxParameters,
};
use crate::models::{DentalPlan, FilingStatus, MemberProfile, PayGrade, PayPeriod};

/// A canned lookup answer.
#[derive(Debug, Clone)]
pub(crate) enum Stub<T> {
    Value(T),
    Missing,
    Fail,
}

impl<T> Default for Stub<T> {
    fn default() -> Self {
        Stub::Missing
    }
}

impl<T: Clone> Stub<T> {
    fn answer(&self, table: &str) -> LookupResult<T> {
        match self {
            Stub::Value(v) => Ok(Some(v.clone())),
            Stub::Missing => Ok(None),
            Stub::Fail => Err(ReconError::LookupFailed {
                table: table.to_string(),
                message: "stub failure".to_string(),
            }),
        }
    }
}

/// A rate lookup that returns fixed answers regardless of the key.
#[derive(Debug, Clone, Default)]
pub(crate) struct StubRates {
    pub base_pay: Stub<i64>,
    pub housing: Stub<i64>,
    pub cola: Stub<i64>,
    pub premium: Stub<i64>,
    pub tax: Stub<TaxParameters>,
    pub state: Stub<StateTaxRule>,
}

impl StubRates {
    /// Every table answers with the standard E05 San Diego figures.
    pub fn complete() -> Self {
        Self {
            base_pay: Stub::Value(423_990),
            housing: Stub::Value(402_900),
            cola: Stub::Missing,
            premium: Stub::Value(3_100),
            tax: Stub::Value(tax_parameters_2025()),
            state: Stub::Value(StateTaxRule::NoIncomeTax),
        }
    }
}

impl RateLookup for StubRates {
    fn base_pay(&self, _: &PayGrade, _: u32, _: NaiveDate) -> LookupResult<i64> {
        self.base_pay.answer("base_pay")
    }

    fn housing_rate(&self, _: &PayGrade, _: &str, _: bool, _: NaiveDate) -> LookupResult<i64> {
        self.housing.answer("housing")
    }

    fn cola_rate(&self, _: &str, _: &PayGrade, _: bool, _: NaiveDate) -> LookupResult<i64> {
        self.cola.answer("cola")
    }

    fn insurance_premium(&self, _: i64) -> LookupResult<i64> {
        self.premium.answer("sgli")
    }

    fn tax_parameters(&self, _: i32) -> LookupResult<TaxParameters> {
        self.tax.answer("tax")
    }

    fn state_tax_rule(&self, _: &str, _: i32) -> LookupResult<StateTaxRule> {
        self.state.answer("state_tax")
    }
}

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn band(up_to: Option<i64>, rate: &str) -> TaxBand {
    TaxBand {
        up_to_cents: up_to,
        rate: dec(rate),
    }
}

fn schedule(standard_deduction_cents: i64, limits: [i64; 3]) -> BracketSchedule {
    BracketSchedule {
        standard_deduction_cents,
        bands: vec![
            band(Some(limits[0]), "0.10"),
            band(Some(limits[1]), "0.12"),
            band(Some(limits[2]), "0.22"),
            band(None, "0.24"),
        ],
    }
}

/// Mirrors `config/rates/tax/2025.yaml`.
pub(crate) fn tax_parameters_2025() -> TaxParameters {
    TaxParameters {
        year: 2025,
        fica_rate: dec("0.062"),
        medicare_rate: dec("0.0145"),
        fica_wage_base_cents: 17_610_000,
        federal: FederalTaxTable {
            single: schedule(1_500_000, [1_192_500, 4_847_500, 10_335_000]),
            married_joint: schedule(3_000_000, [2_385_000, 9_695_000, 20_670_000]),
            head_of_household: schedule(2_250_000, [1_700_000, 6_485_000, 10_335_000]),
        },
    }
}

/// An E05 with six years of service in San Diego, with dependents.
pub(crate) fn e05_profile() -> MemberProfile {
    MemberProfile {
        member_id: "mbr_001".to_string(),
        pay_grade: "E05".to_string(),
        years_of_service: 6,
        location_key: "CA024".to_string(),
        has_dependents: true,
        filing_status: FilingStatus::Single,
        state_of_residence: Some("TX".to_string()),
        tsp_rate_percent: dec("5"),
        sgli_coverage_cents: Some(50_000_000),
        dental_plan: Some(DentalPlan::Single),
        special_pays: vec![],
    }
}

pub(crate) fn march_2025() -> PayPeriod {
    PayPeriod::new(2025, 3).unwrap()
}
