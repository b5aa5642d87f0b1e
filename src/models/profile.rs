//! Member profile model and related types.
//!
//! This module defines the [`MemberProfile`] struct that drives the expected
//! pay calculation, along with the [`PayGrade`] parser and the elections a
//! member can make (special pays, insurance, dental).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, ReconResult};

/// The broad personnel category of a pay grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeKind {
    /// Enlisted grades E-1 through E-9.
    Enlisted,
    /// Warrant officer grades W-1 through W-5.
    Warrant,
    /// Commissioned officer grades O-1 through O-10.
    Officer,
}

impl GradeKind {
    fn prefix(self) -> char {
        match self {
            GradeKind::Enlisted => 'E',
            GradeKind::Warrant => 'W',
            GradeKind::Officer => 'O',
        }
    }

    fn max_level(self) -> u8 {
        match self {
            GradeKind::Enlisted => 9,
            GradeKind::Warrant => 5,
            GradeKind::Officer => 10,
        }
    }
}

/// A parsed military pay grade such as `E05` or `O03`.
///
/// # Example
///
/// ```
/// use pay_recon::models::{GradeKind, PayGrade};
///
/// let grade = PayGrade::parse("e5").unwrap();
/// assert_eq!(grade.kind, GradeKind::Enlisted);
/// assert_eq!(grade.level, 5);
/// assert_eq!(grade.to_string(), "E05");
/// assert!(PayGrade::parse("E10").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayGrade {
    /// Enlisted, warrant, or commissioned officer.
    pub kind: GradeKind,
    /// The numeric level within the kind (1-based).
    pub level: u8,
}

impl PayGrade {
    /// Parses a grade code. Accepts `E5`, `E05`, `E-5` in any case.
    pub fn parse(raw: &str) -> ReconResult<Self> {
        let invalid = || ReconError::InvalidProfile {
            field: "pay_grade".to_string(),
            message: format!("unrecognized pay grade '{}'", raw),
        };

        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        let kind = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('E') => GradeKind::Enlisted,
            Some('W') => GradeKind::Warrant,
            Some('O') => GradeKind::Officer,
            _ => return Err(invalid()),
        };

        let digits = chars.as_str().trim_start_matches('-');
        if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let level: u8 = digits.parse().map_err(|_| invalid())?;
        if level == 0 || level > kind.max_level() {
            return Err(invalid());
        }

        Ok(Self { kind, level })
    }

    /// Returns true for warrant and commissioned officers, who draw officer BAS.
    pub fn is_officer(&self) -> bool {
        matches!(self.kind, GradeKind::Warrant | GradeKind::Officer)
    }
}

impl std::fmt::Display for PayGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:02}", self.kind.prefix(), self.level)
    }
}

/// Federal income tax filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    #[default]
    Single,
    /// Married filing jointly.
    MarriedJoint,
    /// Head of household.
    HeadOfHousehold,
}

/// The special and incentive pays a member can be entitled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialPayKind {
    /// Hostile fire / imminent danger pay.
    HostileFire,
    /// Hardship duty pay.
    HardshipDuty,
    /// Aviation incentive pay.
    Aviation,
    /// Career sea pay.
    CareerSea,
    /// Hazardous duty incentive pay (parachute, demolition, ...).
    HazardousDuty,
    /// Special duty assignment pay.
    SpecialDutyAssignment,
}

impl SpecialPayKind {
    /// The statement code this pay is printed under.
    pub fn code(self) -> &'static str {
        match self {
            SpecialPayKind::HostileFire => "HFP",
            SpecialPayKind::HardshipDuty => "HDP",
            SpecialPayKind::Aviation => "ACIP",
            SpecialPayKind::CareerSea => "CSP",
            SpecialPayKind::HazardousDuty => "HDIP",
            SpecialPayKind::SpecialDutyAssignment => "SDAP",
        }
    }

    /// Every special pay kind, in statement order.
    pub const ALL: [SpecialPayKind; 6] = [
        SpecialPayKind::HostileFire,
        SpecialPayKind::HardshipDuty,
        SpecialPayKind::Aviation,
        SpecialPayKind::CareerSea,
        SpecialPayKind::HazardousDuty,
        SpecialPayKind::SpecialDutyAssignment,
    ];
}

/// A member's election for one special pay element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPayElection {
    /// Which special pay this is.
    pub kind: SpecialPayKind,
    /// Whether the member is currently entitled to it.
    pub enabled: bool,
    /// The monthly amount in cents.
    pub monthly_cents: i64,
}

/// Dental plan enrollment tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DentalPlan {
    /// Member-only enrollment.
    Single,
    /// Family enrollment.
    Family,
}

/// The inputs that drive a member's expected pay.
///
/// Profiles are persisted elsewhere and are read-only to this engine. The
/// pay grade is kept as the raw stored string so that a malformed value only
/// disables the categories that depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Identifier of the member, used only for logging.
    #[serde(default)]
    pub member_id: String,
    /// The pay grade code (e.g. "E05", "O03", "W02").
    pub pay_grade: String,
    /// Completed years of service.
    pub years_of_service: u32,
    /// Housing market area code or postal code of the duty station.
    pub location_key: String,
    /// Whether the member draws the with-dependents housing rate.
    #[serde(default)]
    pub has_dependents: bool,
    /// Federal filing status used for the withholding estimate.
    #[serde(default)]
    pub filing_status: FilingStatus,
    /// Two-letter state of legal residence, if known.
    #[serde(default)]
    pub state_of_residence: Option<String>,
    /// Elected TSP contribution as a percentage (5 means 5%).
    #[serde(default)]
    pub tsp_rate_percent: Decimal,
    /// Elected SGLI coverage in cents; `None` means coverage was declined.
    #[serde(default)]
    pub sgli_coverage_cents: Option<i64>,
    /// Dental plan enrollment; `None` means not enrolled.
    #[serde(default)]
    pub dental_plan: Option<DentalPlan>,
    /// Special pay elections.
    #[serde(default)]
    pub special_pays: Vec<SpecialPayElection>,
}

impl MemberProfile {
    /// Parses the stored pay grade.
    pub fn grade(&self) -> ReconResult<PayGrade> {
        PayGrade::parse(&self.pay_grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_zero_padded_grade() {
        let grade = PayGrade::parse("O03").unwrap();
        assert_eq!(grade.kind, GradeKind::Officer);
        assert_eq!(grade.level, 3);
    }

    #[test]
    fn test_parse_dashed_lowercase_grade() {
        let grade = PayGrade::parse("w-2").unwrap();
        assert_eq!(grade.kind, GradeKind::Warrant);
        assert_eq!(grade.to_string(), "W02");
    }

    #[test]
    fn test_parse_rejects_out_of_range_levels() {
        assert!(PayGrade::parse("E00").is_err());
        assert!(PayGrade::parse("W6").is_err());
        assert!(PayGrade::parse("O11").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PayGrade::parse("").is_err());
        assert!(PayGrade::parse("X05").is_err());
        assert!(PayGrade::parse("E5A").is_err());
        assert!(PayGrade::parse("E").is_err());
        assert!(PayGrade::parse("E123").is_err());
    }

    #[test]
    fn test_parse_error_names_the_field() {
        let err = PayGrade::parse("Z9").unwrap_err();
        assert!(matches!(err, ReconError::InvalidProfile { ref field, .. } if field == "pay_grade"));
    }

    #[test]
    fn test_officer_and_warrant_are_officers() {
        assert!(PayGrade::parse("O01").unwrap().is_officer());
        assert!(PayGrade::parse("W01").unwrap().is_officer());
        assert!(!PayGrade::parse("E09").unwrap().is_officer());
    }

    #[test]
    fn test_special_pay_codes_are_unique() {
        let mut codes: Vec<&str> = SpecialPayKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), SpecialPayKind::ALL.len());
    }

    #[test]
    fn test_deserialize_minimal_profile() {
        let json = r#"{
            "pay_grade": "E05",
            "years_of_service": 6,
            "location_key": "CA024"
        }"#;

        let profile: MemberProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.pay_grade, "E05");
        assert_eq!(profile.years_of_service, 6);
        assert!(!profile.has_dependents);
        assert_eq!(profile.filing_status, FilingStatus::Single);
        assert_eq!(profile.tsp_rate_percent, Decimal::ZERO);
        assert!(profile.sgli_coverage_cents.is_none());
        assert!(profile.special_pays.is_empty());
    }

    #[test]
    fn test_deserialize_full_profile() {
        let json = r#"{
            "member_id": "mbr_001",
            "pay_grade": "O03",
            "years_of_service": 5,
            "location_key": "VA298",
            "has_dependents": true,
            "filing_status": "married_joint",
            "state_of_residence": "VA",
            "tsp_rate_percent": "5",
            "sgli_coverage_cents": 50000000,
            "dental_plan": "family",
            "special_pays": [
                {"kind": "aviation", "enabled": true, "monthly_cents": 25000}
            ]
        }"#;

        let profile: MemberProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.filing_status, FilingStatus::MarriedJoint);
        assert_eq!(profile.tsp_rate_percent, Decimal::from_str("5").unwrap());
        assert_eq!(profile.dental_plan, Some(DentalPlan::Family));
        assert_eq!(profile.special_pays[0].kind, SpecialPayKind::Aviation);
        assert_eq!(profile.grade().unwrap().to_string(), "O03");
    }
}
