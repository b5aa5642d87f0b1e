//! Rank and tenure plausibility checks.
//!
//! Some (pay grade, years of service) pairs cannot occur in practice: a
//! private with twenty years of service, a colonel with three. A snapshot
//! built from such a profile would be confidently wrong, so callers check
//! plausibility first and decide whether to block or warn.

use serde::{Deserialize, Serialize};

use crate::models::{GradeKind, PayGrade};

/// No member serves past this many years.
pub const MAX_YEARS_OF_SERVICE: u32 = 40;

/// The outcome of a plausibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanityVerdict {
    /// Whether the combination is plausible.
    pub valid: bool,
    /// Why the combination was accepted or rejected.
    pub explanation: String,
}

impl SanityVerdict {
    fn accept(grade: &PayGrade, years: u32) -> Self {
        Self {
            valid: true,
            explanation: format!("{} with {} years of service is plausible", grade, years),
        }
    }

    fn reject(explanation: String) -> Self {
        Self {
            valid: false,
            explanation,
        }
    }
}

/// A years-of-service band for a range of grades.
struct TenureBand {
    kind: GradeKind,
    levels: (u8, u8),
    min_years: Option<u32>,
    max_years: Option<u32>,
    description: &'static str,
}

const TENURE_BANDS: [TenureBand; 5] = [
    TenureBand {
        kind: GradeKind::Enlisted,
        levels: (1, 4),
        min_years: None,
        max_years: Some(12),
        description: "junior enlisted",
    },
    TenureBand {
        kind: GradeKind::Enlisted,
        levels: (7, 9),
        min_years: Some(8),
        max_years: None,
        description: "senior enlisted",
    },
    TenureBand {
        kind: GradeKind::Officer,
        levels: (1, 3),
        min_years: None,
        max_years: Some(14),
        description: "junior officer",
    },
    TenureBand {
        kind: GradeKind::Officer,
        levels: (5, 6),
        min_years: Some(12),
        max_years: None,
        description: "senior officer",
    },
    TenureBand {
        kind: GradeKind::Officer,
        levels: (7, 10),
        min_years: Some(20),
        max_years: None,
        description: "flag officer",
    },
];

/// Checks whether a pay grade and years of service can plausibly coexist.
///
/// Never fails: an unreadable grade is reported as an invalid verdict.
///
/// # Example
///
/// ```
/// use pay_recon::calculation::validate_rank_tenure;
///
/// assert!(validate_rank_tenure("E05", 6).valid);
/// assert!(!validate_rank_tenure("E02", 20).valid);
/// assert!(!validate_rank_tenure("O06", 4).valid);
/// ```
pub fn validate_rank_tenure(pay_grade: &str, years_of_service: u32) -> SanityVerdict {
    let grade = match PayGrade::parse(pay_grade) {
        Ok(grade) => grade,
        Err(_) => {
            return SanityVerdict::reject(format!("'{}' is not a recognized pay grade", pay_grade));
        }
    };

    if years_of_service > MAX_YEARS_OF_SERVICE {
        return SanityVerdict::reject(format!(
            "{} years of service exceeds the {}-year maximum",
            years_of_service, MAX_YEARS_OF_SERVICE
        ));
    }

    let band = TENURE_BANDS.iter().find(|band| {
        band.kind == grade.kind && (band.levels.0..=band.levels.1).contains(&grade.level)
    });

    if let Some(band) = band {
        if let Some(max) = band.max_years.filter(|max| years_of_service > *max) {
            return SanityVerdict::reject(format!(
                "{} is a {} grade; {} years of service exceeds the {}-year ceiling",
                grade, band.description, years_of_service, max
            ));
        }
        if let Some(min) = band.min_years.filter(|min| years_of_service < *min) {
            return SanityVerdict::reject(format!(
                "{} is a {} grade; {} years of service is below the {}-year floor",
                grade, band.description, years_of_service, min
            ));
        }
    }

    SanityVerdict::accept(&grade, years_of_service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_san_001_typical_career_is_valid() {
        let verdict = validate_rank_tenure("E05", 6);
        assert!(verdict.valid);
        assert!(verdict.explanation.contains("E05"));
    }

    #[test]
    fn test_san_002_junior_enlisted_ceiling() {
        assert!(validate_rank_tenure("E04", 12).valid);
        let verdict = validate_rank_tenure("E04", 13);
        assert!(!verdict.valid);
        assert!(verdict.explanation.contains("ceiling"));
    }

    #[test]
    fn test_san_003_senior_enlisted_floor() {
        assert!(validate_rank_tenure("E07", 8).valid);
        let verdict = validate_rank_tenure("E09", 5);
        assert!(!verdict.valid);
        assert!(verdict.explanation.contains("floor"));
    }

    #[test]
    fn test_san_004_junior_officer_ceiling() {
        assert!(validate_rank_tenure("O03", 14).valid);
        assert!(!validate_rank_tenure("O02", 15).valid);
    }

    #[test]
    fn test_san_005_senior_and_flag_officer_floors() {
        assert!(!validate_rank_tenure("O06", 11).valid);
        assert!(validate_rank_tenure("O05", 12).valid);
        assert!(!validate_rank_tenure("O07", 19).valid);
        assert!(validate_rank_tenure("O10", 30).valid);
    }

    #[test]
    fn test_san_006_unbanded_grades_only_have_global_limit() {
        assert!(validate_rank_tenure("E05", 0).valid);
        assert!(validate_rank_tenure("W02", 25).valid);
        assert!(!validate_rank_tenure("W02", 41).valid);
    }

    #[test]
    fn test_san_007_unrecognized_grade_is_invalid() {
        let verdict = validate_rank_tenure("general", 10);
        assert!(!verdict.valid);
        assert!(verdict.explanation.contains("not a recognized pay grade"));
    }

    #[test]
    fn test_san_008_accepts_alternate_grade_spellings() {
        assert!(validate_rank_tenure("e-5", 6).valid);
        assert!(validate_rank_tenure("O3", 4).valid);
    }
}
