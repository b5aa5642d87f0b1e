//! Pay statement line item model.
//!
//! Line items arrive already extracted and normalized from an uploaded pay
//! statement. The engine only reads them.

use serde::{Deserialize, Serialize};

/// The section of the pay statement a line item was printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    /// Entitlements: base pay, allowances, special pays.
    Allowance,
    /// Tax withholdings.
    Tax,
    /// Deductions such as TSP and insurance premiums.
    Deduction,
    /// Voluntary allotments to other accounts.
    Allotment,
    /// Debt repayments.
    Debt,
    /// One-off adjustments and summary rows.
    Adjustment,
}

/// One row from a parsed pay statement.
///
/// Several rows may share a `(section, code)` pair, for example a split
/// allowance. Comparison always uses the sum of those rows.
///
/// # Example
///
/// ```
/// use pay_recon::models::{LineItem, Section};
///
/// let item = LineItem::new(Section::Allowance, "BAH", 150_000);
/// assert_eq!(item.code, "BAH");
/// assert_eq!(item.ytd_cents, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The statement section this row appeared in.
    pub section: Section,
    /// Short category identifier (e.g. "BAH", "FITW", "NET_PAY").
    pub code: String,
    /// Current-period amount in cents.
    pub amount_cents: i64,
    /// Year-to-date amount in cents, when the statement prints one.
    #[serde(default)]
    pub ytd_cents: i64,
}

impl LineItem {
    /// Creates a line item with no year-to-date figure.
    pub fn new(section: Section, code: impl Into<String>, amount_cents: i64) -> Self {
        Self {
            section,
            code: code.into(),
            amount_cents,
            ytd_cents: 0,
        }
    }

    /// Returns true if this row's code matches `code`, ignoring ASCII case.
    pub fn has_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }
}
