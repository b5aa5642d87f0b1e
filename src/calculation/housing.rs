//! Housing allowance (BAH) lookup functionality.
//!
//! BAH is an exact table lookup by grade, housing market area and dependency
//! status. When no row matches, the allowance is unknown: no national average
//! or nearby-area rate is ever substituted.

use crate::error::{ReconError, ReconResult};
use crate::lookup::RateLookup;
use crate::models::{MemberProfile, PayPeriod};

/// Determines a member's expected monthly housing allowance.
///
/// Selects the most recent rate effective on or before the last day of
/// `period`.
///
/// # Returns
///
/// - `Ok(Some(cents))` when a rate row matches
/// - `Ok(None)` when no row matches
/// - `Err` when the pay grade or location key is malformed, or the lookup fails
pub fn expected_housing_allowance(
    profile: &MemberProfile,
    period: &PayPeriod,
    rates: &dyn RateLookup,
) -> ReconResult<Option<i64>> {
    let grade = profile.grade()?;
    let location = location_key(profile)?;
    rates.housing_rate(&grade, location, profile.has_dependents, period.last_day())
}

/// Returns the trimmed location key, rejecting blanks.
pub(crate) fn location_key(profile: &MemberProfile) -> ReconResult<&str> {
    let key = profile.location_key.trim();
    if key.is_empty() {
        return Err(ReconError::InvalidProfile {
            field: "location_key".to_string(),
            message: "location key is blank".to_string(),
        });
    }
    Ok(key)
}
