//! Expected snapshot assembly.
//!
//! Each category is computed on its own. A category that cannot be supported
//! by data is left absent and explained with a [`SnapshotDiagnostic`]; it
//! never stops the rest of the snapshot from being built. Derived values
//! (taxable gross, total pay, TSP, taxes, net pay) are only produced when all
//! of their inputs are known and the result fits in cents.

use tracing::{debug, warn};

use crate::error::ReconResult;
use crate::lookup::RateLookup;
use crate::models::{
    DiagnosticKind, ExpectedSnapshot, MemberProfile, PayPeriod, SnapshotDiagnostic,
};

use super::base_pay::expected_base_pay;
use super::cola::expected_cost_of_living_allowance;
use super::deductions::{expected_dental, expected_sgli, expected_tsp};
use super::housing::expected_housing_allowance;
use super::special_pays::expected_special_pays;
use super::subsistence::expected_subsistence_allowance;
use super::taxes::{fica_tax, federal_income_tax, medicare_tax, state_income_tax};

/// Builds the expected pay snapshot for one member and month.
///
/// Only an invalid `period` is an error. Missing reference data and failed
/// lookups leave the affected categories absent with a diagnostic.
///
/// # Example
///
/// ```
/// use pay_recon::calculation::build_expected_snapshot;
/// use pay_recon::config::ConfigLoader;
/// use pay_recon::models::{MemberProfile, PayPeriod};
///
/// let loader = ConfigLoader::load("./config/rates").unwrap();
/// let profile: MemberProfile = serde_json::from_str(r#"{
///     "pay_grade": "E05", "years_of_service": 6, "location_key": "CA024",
///     "has_dependents": true, "state_of_residence": "TX", "tsp_rate_percent": "5"
/// }"#).unwrap();
///
/// let snapshot = build_expected_snapshot(&profile, &PayPeriod::new(2025, 3).unwrap(), loader.tables()).unwrap();
/// assert_eq!(snapshot.base_pay_cents, Some(423_990));
/// assert_eq!(snapshot.bah_cents, Some(402_900));
/// ```
pub fn build_expected_snapshot(
    profile: &MemberProfile,
    period: &PayPeriod,
    rates: &dyn RateLookup,
) -> ReconResult<ExpectedSnapshot> {
    period.validate()?;

    let mut snapshot = ExpectedSnapshot::empty(*period);
    let diagnostics = &mut snapshot.diagnostics;

    snapshot.base_pay_cents = settle(
        "BASE_PAY",
        expected_base_pay(profile, period, rates),
        "no base pay step for grade and years of service",
        diagnostics,
    );
    snapshot.bah_cents = settle(
        "BAH",
        expected_housing_allowance(profile, period, rates),
        "no housing rate for grade, location and dependency status",
        diagnostics,
    );
    snapshot.bas_cents = settle(
        "BAS",
        expected_subsistence_allowance(profile),
        "no subsistence rate",
        diagnostics,
    );
    snapshot.cola_cents = settle(
        "COLA",
        expected_cost_of_living_allowance(profile, period, rates),
        "no cost-of-living rate",
        diagnostics,
    );

    let special_pays = expected_special_pays(profile);
    for rejected in &special_pays.rejected {
        warn!(
            code = %rejected.code,
            reason = %rejected.reason,
            "Rejected special pay election"
        );
        diagnostics.push(SnapshotDiagnostic {
            category: rejected.code.clone(),
            kind: DiagnosticKind::Failed,
            detail: rejected.reason.clone(),
        });
    }
    let special_pays_total = if special_pays.is_complete() {
        special_pays.total_cents()
    } else {
        None
    };
    snapshot.special_pays = special_pays.amounts;

    snapshot.taxable_gross_cents = match (
        snapshot.base_pay_cents,
        snapshot.cola_cents,
        special_pays_total,
    ) {
        (Some(base), Some(cola), Some(specials)) => {
            checked_total("TAXABLE_GROSS", &[base, cola, specials], diagnostics)
        }
        _ => {
            unavailable("TAXABLE_GROSS", "base pay, COLA and special pays", diagnostics);
            None
        }
    };

    snapshot.total_pay_cents = match (
        snapshot.taxable_gross_cents,
        snapshot.bah_cents,
        snapshot.bas_cents,
    ) {
        (Some(taxable), Some(bah), Some(bas)) => {
            checked_total("TOTAL_PAY", &[taxable, bah, bas], diagnostics)
        }
        _ => {
            unavailable("TOTAL_PAY", "taxable gross, BAH and BAS", diagnostics);
            None
        }
    };

    snapshot.tsp_cents = match snapshot.total_pay_cents {
        Some(_) => settle(
            "TSP",
            expected_tsp(snapshot.total_pay_cents, profile.tsp_rate_percent),
            "TSP could not be computed",
            diagnostics,
        ),
        None => {
            unavailable("TSP", "total pay", diagnostics);
            None
        }
    };
    snapshot.sgli_cents = settle(
        "SGLI",
        expected_sgli(profile, rates),
        "no SGLI premium",
        diagnostics,
    );
    snapshot.dental_cents = Some(expected_dental(profile));

    add_taxes(&mut snapshot, profile, rates);

    snapshot.tax_estimates_low_confidence =
        snapshot.federal_tax_cents.is_some() || snapshot.state_tax_cents.is_some();

    snapshot.net_pay_cents = match net_pay_parts(&snapshot) {
        Some((total, withheld)) => {
            let diagnostics = &mut snapshot.diagnostics;
            checked_total("NET_PAY", &withheld, diagnostics).and_then(|withheld| {
                overflow_guard("NET_PAY", total.checked_sub(withheld), diagnostics)
            })
        }
        None => {
            unavailable(
                "NET_PAY",
                "every pay, deduction and tax category",
                &mut snapshot.diagnostics,
            );
            None
        }
    };

    debug!(
        period = %period,
        pay_grade = %profile.pay_grade,
        absent_categories = snapshot.diagnostics.len(),
        "Built expected snapshot"
    );

    Ok(snapshot)
}

/// Fills FICA, Medicare, federal and state withholding.
fn add_taxes(snapshot: &mut ExpectedSnapshot, profile: &MemberProfile, rates: &dyn RateLookup) {
    let diagnostics = &mut snapshot.diagnostics;
    let year = snapshot.period.year;

    let params = settle(
        "TAX_PARAMETERS",
        rates.tax_parameters(year),
        &format!("no tax parameters for {}", year),
        diagnostics,
    );

    let Some(taxable) = snapshot.taxable_gross_cents else {
        for category in ["FICA", "MEDICARE", "FITW", "SITW"] {
            unavailable(category, "taxable gross", diagnostics);
        }
        return;
    };

    match &params {
        Some(params) => {
            snapshot.fica_cents = settle("FICA", fica_tax(taxable, params).map(Some), "", diagnostics);
            snapshot.medicare_cents =
                settle("MEDICARE", medicare_tax(taxable, params).map(Some), "", diagnostics);
            snapshot.federal_tax_cents = settle(
                "FITW",
                federal_income_tax(taxable, profile.filing_status, params).map(Some),
                "",
                diagnostics,
            );
        }
        None => {
            for category in ["FICA", "MEDICARE", "FITW"] {
                unavailable(category, "tax parameters", diagnostics);
            }
        }
    }

    snapshot.state_tax_cents = match profile.state_of_residence.as_deref().map(str::trim) {
        Some(state) if !state.is_empty() => {
            let rule = settle(
                "SITW",
                rates.state_tax_rule(state, year),
                &format!("no state tax rule for {} in {}", state, year),
                diagnostics,
            );
            rule.and_then(|rule| {
                settle("SITW", state_income_tax(taxable, &rule).map(Some), "", diagnostics)
            })
        }
        _ => settle("SITW", Ok(None), "state of residence not provided", diagnostics),
    };
}

/// Total pay and every amount withheld from it, if all are known.
fn net_pay_parts(snapshot: &ExpectedSnapshot) -> Option<(i64, [i64; 7])> {
    Some((
        snapshot.total_pay_cents?,
        [
            snapshot.tsp_cents?,
            snapshot.sgli_cents?,
            snapshot.dental_cents?,
            snapshot.federal_tax_cents?,
            snapshot.state_tax_cents?,
            snapshot.fica_cents?,
            snapshot.medicare_cents?,
        ],
    ))
}

/// Sums `parts`, recording a failure for `category` if the sum does not fit
/// in cents.
fn checked_total(
    category: &str,
    parts: &[i64],
    diagnostics: &mut Vec<SnapshotDiagnostic>,
) -> Option<i64> {
    let total = parts
        .iter()
        .try_fold(0i64, |total, part| total.checked_add(*part));
    overflow_guard(category, total, diagnostics)
}

fn overflow_guard(
    category: &str,
    value: Option<i64>,
    diagnostics: &mut Vec<SnapshotDiagnostic>,
) -> Option<i64> {
    if value.is_none() {
        warn!(category, "Derived amount overflowed");
        diagnostics.push(SnapshotDiagnostic {
            category: category.to_string(),
            kind: DiagnosticKind::Failed,
            detail: "amount does not fit in cents".to_string(),
        });
    }
    value
}

/// Converts a category outcome into an optional amount, recording why it is
/// absent.
fn settle<T>(
    category: &str,
    outcome: ReconResult<Option<T>>,
    not_found: &str,
    diagnostics: &mut Vec<SnapshotDiagnostic>,
) -> Option<T> {
    match outcome {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            debug!(category, detail = not_found, "Category not found in rate data");
            diagnostics.push(SnapshotDiagnostic {
                category: category.to_string(),
                kind: DiagnosticKind::NotFound,
                detail: not_found.to_string(),
            });
            None
        }
        Err(err) => {
            warn!(category, error = %err, "Category computation failed");
            diagnostics.push(SnapshotDiagnostic {
                category: category.to_string(),
                kind: DiagnosticKind::Failed,
                detail: err.to_string(),
            });
            None
        }
    }
}

fn unavailable(category: &str, depends_on: &str, diagnostics: &mut Vec<SnapshotDiagnostic>) {
    diagnostics.push(SnapshotDiagnostic {
        category: category.to_string(),
        kind: DiagnosticKind::DependencyUnavailable,
        detail: format!("requires {}", depends_on),
    });
}
