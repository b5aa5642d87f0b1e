//! End-to-end reconciliation.
//!
//! Runs the rank/tenure check, builds the expected snapshot and compares it
//! with the statement. The caller chooses what an implausible profile means.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::{SanityVerdict, build_expected_snapshot, validate_rank_tenure};
use crate::comparison::{ThresholdConfig, compare};
use crate::error::{ReconError, ReconResult};
use crate::lookup::RateLookup;
use crate::models::{ComparisonResult, ExpectedSnapshot, LineItem, MemberProfile, PayPeriod};

/// What to do when the rank/tenure check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanityPolicy {
    /// Refuse to build a snapshot.
    #[default]
    Block,
    /// Build anyway and report the verdict alongside the results.
    Warn,
}

/// The outcome of reconciling one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Rank/tenure plausibility of the profile.
    pub sanity: SanityVerdict,
    /// What the member should have been paid.
    pub snapshot: ExpectedSnapshot,
    /// Findings and totals.
    pub result: ComparisonResult,
}

/// Checks plausibility and builds the snapshot, without comparing.
pub fn expected_pay(
    profile: &MemberProfile,
    period: &PayPeriod,
    rates: &dyn RateLookup,
    policy: SanityPolicy,
) -> ReconResult<(SanityVerdict, ExpectedSnapshot)> {
    period.validate()?;

    let sanity = validate_rank_tenure(&profile.pay_grade, profile.years_of_service);
    if !sanity.valid {
        warn!(
            pay_grade = %profile.pay_grade,
            years_of_service = profile.years_of_service,
            explanation = %sanity.explanation,
            ?policy,
            "Implausible rank and tenure"
        );
        if policy == SanityPolicy::Block {
            return Err(ReconError::ImplausibleProfile {
                pay_grade: profile.pay_grade.clone(),
                years_of_service: profile.years_of_service,
                explanation: sanity.explanation,
            });
        }
    }

    let snapshot = build_expected_snapshot(profile, period, rates)?;
    Ok((sanity, snapshot))
}

/// Reconciles a statement against the member's expected pay.
///
/// # Errors
///
/// - `InvalidPeriod` when `period` is not a real month
/// - `ImplausibleProfile` when the rank/tenure check fails under
///   [`SanityPolicy::Block`]
pub fn reconcile(
    profile: &MemberProfile,
    period: &PayPeriod,
    items: &[LineItem],
    rates: &dyn RateLookup,
    thresholds: &ThresholdConfig,
    policy: SanityPolicy,
) -> ReconResult<Reconciliation> {
    let (sanity, snapshot) = expected_pay(profile, period, rates, policy)?;
    let result = compare(items, &snapshot, thresholds);
    Ok(Reconciliation {
        sanity,
        snapshot,
        result,
    })
}
