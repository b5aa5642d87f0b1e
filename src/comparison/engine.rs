//! Category-by-category comparison of a pay statement against a snapshot.
//!
//! Each catalog category lands in at most one outcome:
//!
//! | Expected | Actual | Outcome |
//! |---|---|---|
//! | due | absent | `MISSING` (suppressed for an empty statement) |
//! | due | present, off by more than the threshold | `MISMATCH` |
//! | due | present, within the threshold | `VERIFIED` |
//! | nothing due or unknown | nonzero | `UNEXPECTED` |
//!
//! "Due" means a known, nonzero expected amount. A known zero (no COLA for
//! the location, declined SGLI) is nothing due. Net pay is evaluated last.

use crate::models::{
    ComparisonResult, ExpectedSnapshot, LineItem, PayFlag, Severity, saturating_sum,
};

use super::catalog::{CATEGORIES, CategoryKind, CategorySpec, Criticality, NET_PAY};
use super::messages::{self, format_cents};
use super::thresholds::ThresholdConfig;
use super::totals::{actual_net_pay, compute_totals};

/// Code of the synthetic flag emitted when nothing else was flagged.
pub const ALL_VERIFIED: &str = "ALL_VERIFIED";

/// Compares statement line items against an expected snapshot.
///
/// Pure and deterministic: identical inputs always produce identical output.
///
/// # Example
///
/// ```
/// use pay_recon::comparison::{ThresholdConfig, compare};
/// use pay_recon::models::{ExpectedSnapshot, LineItem, PayPeriod, Section};
///
/// let mut snapshot = ExpectedSnapshot::empty(PayPeriod::new(2025, 3).unwrap());
/// snapshot.bah_cents = Some(200_000);
///
/// let items = vec![LineItem::new(Section::Allowance, "BAH", 150_000)];
/// let result = compare(&items, &snapshot, &ThresholdConfig::default());
///
/// let flag = result.flag("BAH_MISMATCH").unwrap();
/// assert_eq!(flag.delta_cents, 50_000);
/// ```
pub fn compare(
    items: &[LineItem],
    snapshot: &ExpectedSnapshot,
    thresholds: &ThresholdConfig,
) -> ComparisonResult {
    let statement_empty = items.is_empty();
    let mut flags = Vec::new();

    for spec in &CATEGORIES {
        let expected = expected_for(snapshot, spec);
        let actual = actual_for(items, spec);
        let threshold = thresholds.threshold_for(spec.code);
        if let Some(flag) = evaluate(spec, expected, actual, threshold, statement_empty) {
            flags.push(flag);
        }
    }

    let totals = compute_totals(items, snapshot);

    if let Some(flag) = evaluate_net_pay(
        snapshot.net_pay_cents,
        actual_net_pay(items),
        thresholds.threshold_for(NET_PAY.code),
        statement_empty,
    ) {
        flags.push(flag);
    }

    if flags.is_empty() && totals.allowances.actual_cents > 0 {
        flags.push(PayFlag {
            code: ALL_VERIFIED.to_string(),
            category: "ALL".to_string(),
            severity: Severity::Green,
            message: format!(
                "All categories verified; {} in allowances reviewed",
                format_cents(totals.allowances.actual_cents)
            ),
            suggestion: "No action needed".to_string(),
            delta_cents: 0,
            ref_url: None,
        });
    }

    tracing::debug!(
        flags = flags.len(),
        line_items = items.len(),
        "Compared statement against expected snapshot"
    );

    ComparisonResult { flags, totals }
}

/// The snapshot's expectation for a category.
fn expected_for(snapshot: &ExpectedSnapshot, spec: &CategorySpec) -> Option<i64> {
    match spec.code {
        "BASE_PAY" => snapshot.base_pay_cents,
        "BAH" => snapshot.bah_cents,
        "BAS" => snapshot.bas_cents,
        "COLA" => snapshot.cola_cents,
        "TSP" => snapshot.tsp_cents,
        "SGLI" => snapshot.sgli_cents,
        "DENTAL" => snapshot.dental_cents,
        "FICA" => snapshot.fica_cents,
        "MEDICARE" => snapshot.medicare_cents,
        "FITW" => snapshot.federal_tax_cents,
        "SITW" => snapshot.state_tax_cents,
        code => match snapshot.special_pays.iter().find(|s| s.code == code) {
            Some(special) => Some(special.amount_cents),
            // A rejected election is unknown; one never elected is nothing due
            None if snapshot.diagnostic_for(code).is_some() => None,
            None => Some(0),
        },
    }
}

/// Sums the statement rows that feed a category.
fn actual_for(items: &[LineItem], spec: &CategorySpec) -> Option<i64> {
    let mut rows = items
        .iter()
        .filter(|item| spec.section.is_none_or(|s| s == item.section))
        .filter(|item| spec.accepts_code(&item.code))
        .peekable();
    rows.peek()?;
    Some(saturating_sum(rows.map(|item| item.amount_cents)))
}

fn evaluate(
    spec: &CategorySpec,
    expected: Option<i64>,
    actual: Option<i64>,
    threshold: i64,
    statement_empty: bool,
) -> Option<PayFlag> {
    let due = expected.filter(|e| *e != 0);

    match (due, actual) {
        (Some(expected), None) if !statement_empty => Some(flag(
            spec,
            "MISSING",
            missing_severity(spec),
            messages::missing(spec, expected),
            expected,
        )),
        (Some(expected), Some(actual)) => {
            let delta = expected.saturating_sub(actual);
            if within(delta, threshold) {
                Some(flag(
                    spec,
                    "VERIFIED",
                    Severity::Green,
                    messages::verified(spec, actual),
                    delta,
                ))
            } else {
                Some(flag(
                    spec,
                    "MISMATCH",
                    mismatch_severity(spec, delta),
                    messages::mismatch(spec, expected, actual),
                    delta,
                ))
            }
        }
        (None, Some(actual)) if actual != 0 => {
            let mut flag = flag(
                spec,
                "UNEXPECTED",
                Severity::Yellow,
                messages::unexpected(spec, actual, expected),
                actual.saturating_neg(),
            );
            flag.suggestion = messages::UNEXPECTED_SUGGESTION.to_string();
            Some(flag)
        }
        _ => None,
    }
}

fn evaluate_net_pay(
    expected: Option<i64>,
    actual: Option<i64>,
    threshold: i64,
    statement_empty: bool,
) -> Option<PayFlag> {
    match (expected, actual) {
        (Some(expected), Some(actual)) => {
            let delta = expected.saturating_sub(actual);
            if within(delta, threshold) {
                Some(flag(
                    &NET_PAY,
                    "VERIFIED",
                    Severity::Green,
                    format!("Net pay confirmed: {} matches the expected amount", format_cents(actual)),
                    delta,
                ))
            } else {
                Some(flag(
                    &NET_PAY,
                    "MISMATCH",
                    if delta > 0 { Severity::Red } else { Severity::Yellow },
                    messages::mismatch(&NET_PAY, expected, actual),
                    delta,
                ))
            }
        }
        (Some(expected), None) if !statement_empty => Some(verification_needed(format!(
            "Net pay of {} was expected but the statement does not show net pay",
            format_cents(expected)
        ))),
        (None, Some(actual)) => Some(verification_needed(format!(
            "Statement shows net pay of {} but expected net pay could not be computed",
            format_cents(actual)
        ))),
        _ => None,
    }
}

/// A delta exactly at the threshold is within tolerance.
fn within(delta: i64, threshold: i64) -> bool {
    delta.unsigned_abs() <= threshold.max(0).unsigned_abs()
}

fn verification_needed(message: String) -> PayFlag {
    let mut flag = flag(&NET_PAY, "VERIFICATION_NEEDED", Severity::Yellow, message, 0);
    flag.suggestion =
        "Compare the amount deposited to your account with the expected net pay".to_string();
    flag
}

fn missing_severity(spec: &CategorySpec) -> Severity {
    match spec.criticality {
        Criticality::Critical => Severity::Red,
        Criticality::Standard => Severity::Yellow,
    }
}

/// Underpaid entitlements are red; everything else is a warning, including
/// deviations from the coarse tax estimates.
fn mismatch_severity(spec: &CategorySpec, delta: i64) -> Severity {
    if spec.kind == CategoryKind::Entitlement && delta > 0 {
        Severity::Red
    } else {
        Severity::Yellow
    }
}

fn flag(
    spec: &CategorySpec,
    outcome: &str,
    severity: Severity,
    message: String,
    delta_cents: i64,
) -> PayFlag {
    PayFlag {
        code: format!("{}_{}", spec.code, outcome),
        category: spec.code.to_string(),
        severity,
        message,
        suggestion: spec.suggestion.to_string(),
        delta_cents,
        ref_url: spec.ref_url.map(str::to_string),
    }
}
