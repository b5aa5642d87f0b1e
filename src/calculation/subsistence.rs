//! Subsistence allowance (BAS) calculation.
//!
//! BAS is a flat monthly rate that depends only on whether the member is an
//! officer (including warrant officers) or enlisted.

use crate::error::ReconResult;
use crate::models::MemberProfile;

/// Monthly enlisted BAS in cents.
pub const BAS_ENLISTED_CENTS: i64 = 46_577;

/// Monthly officer BAS in cents.
pub const BAS_OFFICER_CENTS: i64 = 32_078;

/// Determines a member's expected monthly subsistence allowance.
///
/// Fails only when the pay grade cannot be parsed.
///
/// # Examples
///
/// ```
/// use pay_recon::calculation::{expected_subsistence_allowance, BAS_OFFICER_CENTS};
/// use pay_recon::models::MemberProfile;
///
/// let profile: MemberProfile = serde_json::from_str(
///     r#"{"pay_grade": "W02", "years_of_service": 9, "location_key": "TX285"}"#,
/// ).unwrap();
/// assert_eq!(expected_subsistence_allowance(&profile).unwrap(), Some(BAS_OFFICER_CENTS));
/// ```
pub fn expected_subsistence_allowance(profile: &MemberProfile) -> ReconResult<Option<i64>> {
    let grade = profile.grade()?;
    Ok(Some(if grade.is_officer() {
        BAS_OFFICER_CENTS
    } else {
        BAS_ENLISTED_CENTS
    }))
}
