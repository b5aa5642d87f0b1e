//! Expected pay calculation.
//!
//! This module contains one calculation per pay category (base pay, housing,
//! subsistence, cost-of-living, special pays, deductions and taxes), the
//! snapshot builder that composes them, and the rank/tenure plausibility
//! check that runs before any of them is trusted.

mod base_pay;
mod cola;
mod deductions;
mod housing;
mod money;
mod sanity;
mod snapshot;
mod special_pays;
mod subsistence;
mod taxes;

#[cfg(test)]
pub(crate) mod fixtures;

pub use base_pay::expected_base_pay;
pub use cola::expected_cost_of_living_allowance;
pub use deductions::{
    DENTAL_FAMILY_CENTS, DENTAL_SINGLE_CENTS, SGLI_CENTS_PER_THOUSAND, TSGLI_RIDER_CENTS,
    expected_dental, expected_sgli, expected_tsp,
};
pub use housing::expected_housing_allowance;
pub use money::{apply_rate, percent_of, round_cents};
pub use sanity::{MAX_YEARS_OF_SERVICE, SanityVerdict, validate_rank_tenure};
pub use snapshot::build_expected_snapshot;
pub use special_pays::{
    MAX_SPECIAL_PAY_CENTS, RejectedSpecialPay, SpecialPaysOutcome, expected_special_pays,
};
pub use subsistence::{BAS_ENLISTED_CENTS, BAS_OFFICER_CENTS, expected_subsistence_allowance};
pub use taxes::{
    coarse_monthly_estimate, federal_income_tax, fica_tax, medicare_tax, state_income_tax,
};
