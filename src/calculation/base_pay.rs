//! Base pay lookup functionality.
//!
//! Basic pay comes from a step table keyed by pay grade and completed years of
//! service. The applicable step is the highest one whose years do not exceed
//! the member's; there is no interpolation between steps.

use crate::error::ReconResult;
use crate::lookup::RateLookup;
use crate::models::{MemberProfile, PayPeriod};

/// Determines a member's expected monthly basic pay.
///
/// Uses the base pay table in effect on the last day of `period`.
///
/// # Returns
///
/// - `Ok(Some(cents))` when a table row qualifies
/// - `Ok(None)` when no table or step covers the grade and years of service
/// - `Err` when the pay grade is malformed or the lookup fails
pub fn expected_base_pay(
    profile: &MemberProfile,
    period: &PayPeriod,
    rates: &dyn RateLookup,
) -> ReconResult<Option<i64>> {
    let grade = profile.grade()?;
    rates.base_pay(&grade, profile.years_of_service, period.last_day())
}
