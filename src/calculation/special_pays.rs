//! Special and incentive pay calculation.
//!
//! Special pays are read straight from the member's elections. Each one is
//! independently toggled; only enabled elections contribute.

use crate::models::{MemberProfile, SpecialPayAmount};

/// Largest monthly amount accepted for a single special pay election.
pub const MAX_SPECIAL_PAY_CENTS: i64 = 1_000_000;

/// An enabled election that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSpecialPay {
    /// Statement code of the special pay.
    pub code: String,
    /// Why it was rejected.
    pub reason: String,
}

/// The special pays a member should receive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecialPaysOutcome {
    /// Accepted special pays, in election order.
    pub amounts: Vec<SpecialPayAmount>,
    /// Enabled elections that were malformed.
    pub rejected: Vec<RejectedSpecialPay>,
}

impl SpecialPaysOutcome {
    /// Returns true when every enabled election was usable, so the sum of
    /// `amounts` can be trusted as the member's special pay total.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Sum of accepted special pays, or `None` if it does not fit in cents.
    pub fn total_cents(&self) -> Option<i64> {
        self.amounts
            .iter()
            .try_fold(0i64, |total, a| total.checked_add(a.amount_cents))
    }
}

/// Collects the enabled special pays from a profile.
///
/// Disabled elections are ignored whatever their amount. An enabled election
/// with a negative amount or one above [`MAX_SPECIAL_PAY_CENTS`], or a second
/// enabled election of the same kind, is rejected.
pub fn expected_special_pays(profile: &MemberProfile) -> SpecialPaysOutcome {
    let mut outcome = SpecialPaysOutcome::default();

    for election in profile.special_pays.iter().filter(|e| e.enabled) {
        let code = election.kind.code();

        if election.monthly_cents < 0 {
            outcome.rejected.push(RejectedSpecialPay {
                code: code.to_string(),
                reason: format!("monthly amount {} is negative", election.monthly_cents),
            });
            continue;
        }

        if election.monthly_cents > MAX_SPECIAL_PAY_CENTS {
            outcome.rejected.push(RejectedSpecialPay {
                code: code.to_string(),
                reason: format!(
                    "monthly amount {} exceeds the {} ceiling",
                    election.monthly_cents, MAX_SPECIAL_PAY_CENTS
                ),
            });
            continue;
        }

        if outcome.amounts.iter().any(|a| a.code == code) {
            outcome.rejected.push(RejectedSpecialPay {
                code: code.to_string(),
                reason: "duplicate enabled election".to_string(),
            });
            continue;
        }

        outcome.amounts.push(SpecialPayAmount {
            code: code.to_string(),
            amount_cents: election.monthly_cents,
        });
    }

    outcome
}
