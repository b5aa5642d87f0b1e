//! Cost-of-living allowance (COLA) lookup functionality.
//!
//! Most locations pay no COLA. A lookup that finds no row is therefore a
//! known zero, while a failed lookup leaves COLA unknown.

use crate::error::ReconResult;
use crate::lookup::RateLookup;
use crate::models::{MemberProfile, PayPeriod};

use super::housing::location_key;

/// Determines a member's expected monthly cost-of-living allowance.
///
/// # Returns
///
/// - `Ok(Some(cents))` when the location pays COLA
/// - `Ok(Some(0))` when the location has no COLA row
/// - `Err` when the pay grade or location key is malformed, or the lookup fails
pub fn expected_cost_of_living_allowance(
    profile: &MemberProfile,
    period: &PayPeriod,
    rates: &dyn RateLookup,
) -> ReconResult<Option<i64>> {
    let grade = profile.grade()?;
    let location = location_key(profile)?;
    let rate = rates.cola_rate(location, &grade, profile.has_dependents, period.last_day())?;
    Ok(Some(rate.unwrap_or(0)))
}
