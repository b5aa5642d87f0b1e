//! Expected pay snapshot model.
//!
//! An [`ExpectedSnapshot`] is a sparse record of what a member's pay should be
//! for one month. Every category is optional: `None` means the engine could
//! not support a number from data, which is different from a known zero.

use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// One expected special pay line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPayAmount {
    /// Statement code of the special pay (e.g. "HFP").
    pub code: String,
    /// Expected monthly amount in cents.
    pub amount_cents: i64,
}

/// Why a category is missing from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The reference data had no qualifying row.
    NotFound,
    /// A lookup or computation failed.
    Failed,
    /// The category is derived from another category that is absent.
    DependencyUnavailable,
}

/// Explains an absent category in an [`ExpectedSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiagnostic {
    /// The category code (e.g. "BAH").
    pub category: String,
    /// Whether data was absent or a failure occurred.
    pub kind: DiagnosticKind,
    /// Human-readable detail.
    pub detail: String,
}

/// Expected pay for one member and one month.
///
/// Snapshots are built by [`crate::calculation::build_expected_snapshot`] and
/// treated as immutable values afterwards. When populated, the derived fields
/// satisfy:
///
/// - `taxable_gross = base_pay + cola + sum(special_pays)`
/// - `total_pay = taxable_gross + bah + bas`
/// - `net_pay = total_pay - (tsp + sgli + dental) - (federal + state + fica + medicare)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedSnapshot {
    /// The month this snapshot describes.
    pub period: PayPeriod,
    /// Monthly basic pay.
    pub base_pay_cents: Option<i64>,
    /// Basic Allowance for Housing (non-taxable).
    pub bah_cents: Option<i64>,
    /// Basic Allowance for Subsistence (non-taxable).
    pub bas_cents: Option<i64>,
    /// Cost-of-living allowance; `Some(0)` when the location has none.
    pub cola_cents: Option<i64>,
    /// Enabled special pays.
    pub special_pays: Vec<SpecialPayAmount>,
    /// Base pay plus COLA plus special pays.
    pub taxable_gross_cents: Option<i64>,
    /// Taxable gross plus BAH and BAS.
    pub total_pay_cents: Option<i64>,
    /// Thrift Savings Plan contribution.
    pub tsp_cents: Option<i64>,
    /// SGLI premium; `Some(0)` when coverage was declined.
    pub sgli_cents: Option<i64>,
    /// Dental premium; `Some(0)` when not enrolled.
    pub dental_cents: Option<i64>,
    /// Coarse federal withholding estimate.
    pub federal_tax_cents: Option<i64>,
    /// Coarse state withholding estimate.
    pub state_tax_cents: Option<i64>,
    /// Social Security withholding.
    pub fica_cents: Option<i64>,
    /// Medicare withholding.
    pub medicare_cents: Option<i64>,
    /// Expected net pay.
    pub net_pay_cents: Option<i64>,
    /// True when federal or state figures are present; they are directional
    /// estimates, not authoritative withholding amounts.
    pub tax_estimates_low_confidence: bool,
    /// Reasons for every absent category.
    pub diagnostics: Vec<SnapshotDiagnostic>,
}

impl ExpectedSnapshot {
    /// Creates a snapshot with every category absent.
    pub fn empty(period: PayPeriod) -> Self {
        Self {
            period,
            base_pay_cents: None,
            bah_cents: None,
            bas_cents: None,
            cola_cents: None,
            special_pays: Vec::new(),
            taxable_gross_cents: None,
            total_pay_cents: None,
            tsp_cents: None,
            sgli_cents: None,
            dental_cents: None,
            federal_tax_cents: None,
            state_tax_cents: None,
            fica_cents: None,
            medicare_cents: None,
            net_pay_cents: None,
            tax_estimates_low_confidence: false,
            diagnostics: Vec::new(),
        }
    }

    /// Sum of the enabled special pays.
    pub fn special_pays_total_cents(&self) -> i64 {
        saturating_sum(self.special_pays.iter().map(|s| s.amount_cents))
    }

    /// Sum of the populated entitlement categories.
    pub fn expected_allowances_cents(&self) -> i64 {
        saturating_sum(
            [
                self.base_pay_cents,
                self.bah_cents,
                self.bas_cents,
                self.cola_cents,
            ]
            .into_iter()
            .flatten(),
        )
        .saturating_add(self.special_pays_total_cents())
    }

    /// Sum of the populated deduction categories.
    pub fn expected_deductions_cents(&self) -> i64 {
        saturating_sum(
            [self.tsp_cents, self.sgli_cents, self.dental_cents]
                .into_iter()
                .flatten(),
        )
    }

    /// Sum of the populated tax categories.
    pub fn expected_taxes_cents(&self) -> i64 {
        saturating_sum(
            [
                self.federal_tax_cents,
                self.state_tax_cents,
                self.fica_cents,
                self.medicare_cents,
            ]
            .into_iter()
            .flatten(),
        )
    }

    /// Returns the diagnostic recorded for `category`, if any.
    pub fn diagnostic_for(&self, category: &str) -> Option<&SnapshotDiagnostic> {
        self.diagnostics.iter().find(|d| d.category == category)
    }
}

/// Sums amounts, clamping at the `i64` bounds.
pub(crate) fn saturating_sum(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts.into_iter().fold(0, i64::saturating_add)
}
