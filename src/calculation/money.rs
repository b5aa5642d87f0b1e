//! Cent arithmetic helpers.
//!
//! Amounts are carried as integer cents. Rates are `Decimal`, and every
//! product is rounded half away from zero to the nearest cent exactly once.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ReconError, ReconResult};

/// Rounds a cent value to a whole cent.
pub fn round_cents(value: Decimal) -> ReconResult<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| ReconError::CalculationError {
            message: format!("amount {} does not fit in cents", value),
        })
}

/// Multiplies an amount by a fractional rate (0.062 means 6.2%).
///
/// # Example
///
/// ```
/// use pay_recon::calculation::apply_rate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let medicare = apply_rate(423_990, Decimal::from_str("0.0145").unwrap()).unwrap();
/// assert_eq!(medicare, 6_148);
/// ```
pub fn apply_rate(cents: i64, rate: Decimal) -> ReconResult<i64> {
    let product = Decimal::from(cents)
        .checked_mul(rate)
        .ok_or_else(|| ReconError::CalculationError {
            message: format!("{} cents x {} overflowed", cents, rate),
        })?;
    round_cents(product)
}

/// Takes a percentage of an amount (5 means 5%).
pub fn percent_of(cents: i64, percent: Decimal) -> ReconResult<i64> {
    apply_rate(cents, percent / Decimal::ONE_HUNDRED)
}
