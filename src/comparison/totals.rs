//! Bucket totals.
//!
//! Actual sums come straight from statement sections; expected sums come from
//! the snapshot's populated categories. Net pay rows are reported separately
//! and never counted in a bucket. Sums clamp at the `i64` bounds.

use crate::models::{
    BucketTotals, ExpectedSnapshot, LineItem, NetPayTotals, Section, Totals, saturating_sum,
};

use super::catalog::NET_PAY;

/// Sums the statement rows printed under the net pay code.
pub fn actual_net_pay(items: &[LineItem]) -> Option<i64> {
    let mut rows = items.iter().filter(|item| NET_PAY.accepts_code(&item.code)).peekable();
    rows.peek()?;
    Some(saturating_sum(rows.map(|item| item.amount_cents)))
}

/// Reconciles statement sections against the snapshot's expected buckets.
pub fn compute_totals(items: &[LineItem], snapshot: &ExpectedSnapshot) -> Totals {
    let mut allowances: i64 = 0;
    let mut deductions: i64 = 0;
    let mut taxes: i64 = 0;
    let mut unmodeled: i64 = 0;

    for item in items.iter().filter(|item| !NET_PAY.accepts_code(&item.code)) {
        let bucket = match item.section {
            Section::Allowance => &mut allowances,
            Section::Deduction => &mut deductions,
            Section::Tax => &mut taxes,
            Section::Allotment | Section::Debt | Section::Adjustment => &mut unmodeled,
        };
        *bucket = bucket.saturating_add(item.amount_cents);
    }

    let actual_net = actual_net_pay(items);
    let expected_net = snapshot.net_pay_cents;

    Totals {
        allowances: BucketTotals::new(allowances, snapshot.expected_allowances_cents()),
        deductions: BucketTotals::new(deductions, snapshot.expected_deductions_cents()),
        taxes: BucketTotals::new(taxes, snapshot.expected_taxes_cents()),
        unmodeled_actual_cents: unmodeled,
        net_pay: NetPayTotals {
            actual_cents: actual_net,
            expected_cents: expected_net,
            delta_cents: expected_net.zip(actual_net).map(|(e, a)| e.saturating_sub(a)),
        },
    }
}
