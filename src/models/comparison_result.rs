//! Comparison result models for the Pay Reconciliation Engine.
//!
//! This module contains the [`ComparisonResult`] type and its associated
//! structures: the [`PayFlag`] findings and the reconciled [`Totals`].

use serde::{Deserialize, Serialize};

/// How urgently a flag needs the member's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Action required.
    Red,
    /// Warning; verify with finance.
    Yellow,
    /// Confirmed correct.
    Green,
}

/// One finding produced by the comparison engine.
///
/// # Example
///
/// ```
/// use pay_recon::models::{PayFlag, Severity};
///
/// let flag = PayFlag {
///     code: "BAH_MISMATCH".to_string(),
///     category: "BAH".to_string(),
///     severity: Severity::Red,
///     message: "BAH paid $1,500.00 but $2,000.00 was expected".to_string(),
///     suggestion: "Contact your finance office".to_string(),
///     delta_cents: 50_000,
///     ref_url: None,
/// };
/// assert!(flag.is_actionable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayFlag {
    /// Category plus outcome, e.g. "BAH_MISMATCH".
    pub code: String,
    /// The category this flag is about, e.g. "BAH".
    pub category: String,
    /// Flag severity.
    pub severity: Severity,
    /// What was observed.
    pub message: String,
    /// What the member should do next.
    pub suggestion: String,
    /// Expected minus actual, in cents. Positive means underpaid (or, for
    /// deductions and taxes, under-withheld).
    pub delta_cents: i64,
    /// Reference page explaining the entitlement.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ref_url: Option<String>,
}

impl PayFlag {
    /// Returns true for red and yellow flags.
    pub fn is_actionable(&self) -> bool {
        self.severity != Severity::Green
    }
}

/// Actual and expected aggregates for one pay-type bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketTotals {
    /// Sum of the statement rows in this bucket.
    pub actual_cents: i64,
    /// Sum of the populated snapshot categories in this bucket.
    pub expected_cents: i64,
    /// Expected minus actual.
    pub delta_cents: i64,
}

impl BucketTotals {
    /// Builds a bucket from its two sides.
    pub fn new(actual_cents: i64, expected_cents: i64) -> Self {
        Self {
            actual_cents,
            expected_cents,
            delta_cents: expected_cents.saturating_sub(actual_cents),
        }
    }
}

/// Net pay as printed and as expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetPayTotals {
    /// Net pay printed on the statement, if any.
    pub actual_cents: Option<i64>,
    /// Net pay from the snapshot, if it could be computed.
    pub expected_cents: Option<i64>,
    /// Expected minus actual, when both are present.
    pub delta_cents: Option<i64>,
}

/// Aggregate reconciliation of a statement against a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Entitlements: base pay, allowances, special pays.
    pub allowances: BucketTotals,
    /// Deductions: TSP and insurance premiums.
    pub deductions: BucketTotals,
    /// Tax withholdings.
    pub taxes: BucketTotals,
    /// Allotments, debts and adjustments printed on the statement, which the
    /// expected model does not cover.
    pub unmodeled_actual_cents: i64,
    /// Net pay comparison.
    pub net_pay: NetPayTotals,
}

/// The complete output of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Findings in evaluation order; net pay is always last.
    pub flags: Vec<PayFlag>,
    /// Reconciled aggregates.
    pub totals: Totals,
}

impl ComparisonResult {
    /// Returns the first flag with the given code.
    pub fn flag(&self, code: &str) -> Option<&PayFlag> {
        self.flags.iter().find(|f| f.code == code)
    }

    /// Returns all flags for a category.
    pub fn flags_for<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a PayFlag> + 'a {
        self.flags.iter().filter(move |f| f.category == category)
    }

    /// Returns the most severe flag level present, if any.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.flags.iter().map(|f| f.severity).min()
    }
}
