//! Deduction calculations: TSP, SGLI and dental premiums.
//!
//! TSP is a percentage of total pay, including the non-taxable housing and
//! subsistence allowances. Insurance premiums are table lookups with fixed
//! fallbacks for elected coverage the table does not list.

use rust_decimal::Decimal;

use crate::error::{ReconError, ReconResult};
use crate::lookup::RateLookup;
use crate::models::{DentalPlan, MemberProfile};

use super::money::percent_of;

/// SGLI premium per $1,000 of coverage, in cents, used when the premium table
/// has no row for the elected coverage.
pub const SGLI_CENTS_PER_THOUSAND: i64 = 6;

/// Flat monthly TSGLI rider added to every SGLI premium.
pub const TSGLI_RIDER_CENTS: i64 = 100;

/// Monthly member-only dental premium.
pub const DENTAL_SINGLE_CENTS: i64 = 1_404;

/// Monthly family dental premium.
pub const DENTAL_FAMILY_CENTS: i64 = 3_650;

/// Computes the expected TSP contribution from total pay.
///
/// Returns `Ok(None)` when total pay is unknown, and `InvalidProfile` when the
/// elected percentage is outside 0-100.
///
/// # Examples
///
/// ```
/// use pay_recon::calculation::expected_tsp;
/// use rust_decimal::Decimal;
///
/// assert_eq!(expected_tsp(Some(873_467), Decimal::from(5)).unwrap(), Some(43_673));
/// assert_eq!(expected_tsp(None, Decimal::from(5)).unwrap(), None);
/// ```
pub fn expected_tsp(total_pay_cents: Option<i64>, rate_percent: Decimal) -> ReconResult<Option<i64>> {
    if rate_percent < Decimal::ZERO || rate_percent > Decimal::ONE_HUNDRED {
        return Err(ReconError::InvalidProfile {
            field: "tsp_rate_percent".to_string(),
            message: format!("{} is not a percentage between 0 and 100", rate_percent),
        });
    }
    total_pay_cents
        .map(|total| percent_of(total, rate_percent))
        .transpose()
}

/// Computes the expected SGLI premium.
///
/// Declined coverage is a known zero. Elected coverage missing from the
/// premium table falls back to [`SGLI_CENTS_PER_THOUSAND`] plus the TSGLI
/// rider.
pub fn expected_sgli(profile: &MemberProfile, rates: &dyn RateLookup) -> ReconResult<Option<i64>> {
    let Some(coverage) = profile.sgli_coverage_cents else {
        return Ok(Some(0));
    };

    if coverage < 0 {
        return Err(ReconError::InvalidProfile {
            field: "sgli_coverage_cents".to_string(),
            message: format!("coverage {} is negative", coverage),
        });
    }
    if coverage == 0 {
        return Ok(Some(0));
    }

    match rates.insurance_premium(coverage)? {
        Some(premium) => Ok(Some(premium)),
        None => {
            let thousands = coverage / 100_000;
            let premium = thousands * SGLI_CENTS_PER_THOUSAND + TSGLI_RIDER_CENTS;
            tracing::debug!(
                coverage_cents = coverage,
                premium_cents = premium,
                "No SGLI table row for coverage, using per-thousand fallback"
            );
            Ok(Some(premium))
        }
    }
}

/// Computes the expected dental premium.
///
/// Premiums are fixed per plan tier, so dental is always known. Non-enrollment
/// is zero.
pub fn expected_dental(profile: &MemberProfile) -> i64 {
    match profile.dental_plan {
        None => 0,
        Some(DentalPlan::Single) => DENTAL_SINGLE_CENTS,
        Some(DentalPlan::Family) => DENTAL_FAMILY_CENTS,
    }
}
