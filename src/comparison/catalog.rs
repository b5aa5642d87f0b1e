//! Category catalog.
//!
//! Every pay category the engine evaluates is described once here: which
//! statement rows feed it, how critical it is, its default materiality
//! threshold, and what the member should be told to do.

use crate::models::Section;

/// Which aggregate bucket a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Base pay, allowances, special pays.
    Entitlement,
    /// TSP and premiums.
    Deduction,
    /// Precise payroll taxes (FICA, Medicare).
    Tax,
    /// Coarse withholding estimates (federal, state).
    EstimatedTax,
    /// The bottom line.
    NetPay,
}

/// How loudly an absent category should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Absence is reported red.
    Critical,
    /// Absence is reported yellow.
    Standard,
}

/// Static description of one pay category.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    /// Category code; also the primary statement code.
    pub code: &'static str,
    /// Human-readable name used in messages.
    pub label: &'static str,
    /// Statement section the rows are read from; `None` matches any section.
    pub section: Option<Section>,
    /// Additional statement codes that feed this category.
    pub aliases: &'static [&'static str],
    /// Aggregate bucket.
    pub kind: CategoryKind,
    /// Severity of a missing flag.
    pub criticality: Criticality,
    /// Default materiality threshold in cents.
    pub default_threshold_cents: i64,
    /// What to do about a mismatch or an absence.
    pub suggestion: &'static str,
    /// Reference page, if one exists.
    pub ref_url: Option<&'static str>,
}

impl CategorySpec {
    /// Returns true if a statement code feeds this category.
    pub fn accepts_code(&self, code: &str) -> bool {
        code.eq_ignore_ascii_case(self.code)
            || self.aliases.iter().any(|a| code.eq_ignore_ascii_case(a))
    }
}

const DFAS_PAY_TABLES: &str = "https://www.dfas.mil/MilitaryMembers/payentitlements/Pay-Tables/";
const DFAS_SPECIAL_PAYS: &str = "https://www.dfas.mil/MilitaryMembers/payentitlements/specialpay/";
const DTMO_BAH: &str = "https://www.travel.dod.mil/Allowances/Basic-Allowance-for-Housing/";
const DTMO_COLA: &str = "https://www.travel.dod.mil/Allowances/Cost-of-Living-Allowance-CONUS/";
const DFAS_BAS: &str = "https://www.dfas.mil/MilitaryMembers/payentitlements/Pay-Tables/BAS/";
const TSP: &str = "https://www.tsp.gov/making-contributions/";
const SGLI: &str = "https://www.va.gov/life-insurance/options-eligibility/sgli/";
const DENTAL: &str = "https://tricare.mil/CoveredServices/Dental/TDP";
const IRS_WITHHOLDING: &str = "https://www.irs.gov/individuals/tax-withholding-estimator";

const fn special_pay(code: &'static str, label: &'static str) -> CategorySpec {
    CategorySpec {
        code,
        label,
        section: Some(Section::Allowance),
        aliases: &[],
        kind: CategoryKind::Entitlement,
        criticality: Criticality::Standard,
        default_threshold_cents: 1_000,
        suggestion: "Confirm the special pay start and stop dates on your orders with your finance office",
        ref_url: Some(DFAS_SPECIAL_PAYS),
    }
}

/// Categories in evaluation order. Net pay is evaluated separately, last.
pub const CATEGORIES: [CategorySpec; 17] = [
    CategorySpec {
        code: "BASE_PAY",
        label: "Base pay",
        section: Some(Section::Allowance),
        aliases: &["BASIC_PAY"],
        kind: CategoryKind::Entitlement,
        criticality: Criticality::Critical,
        default_threshold_cents: 5_000,
        suggestion: "Verify your pay grade and pay entry base date with your finance office",
        ref_url: Some(DFAS_PAY_TABLES),
    },
    CategorySpec {
        code: "BAH",
        label: "Housing allowance",
        section: Some(Section::Allowance),
        aliases: &[],
        kind: CategoryKind::Entitlement,
        criticality: Criticality::Critical,
        default_threshold_cents: 5_000,
        suggestion: "Verify your dependency status and the MHA code for your duty station with your finance office",
        ref_url: Some(DTMO_BAH),
    },
    CategorySpec {
        code: "BAS",
        label: "Subsistence allowance",
        section: Some(Section::Allowance),
        aliases: &[],
        kind: CategoryKind::Entitlement,
        criticality: Criticality::Critical,
        default_threshold_cents: 1_000,
        suggestion: "Check whether you are on an essential-station meal card and contact your finance office",
        ref_url: Some(DFAS_BAS),
    },
    CategorySpec {
        code: "COLA",
        label: "Cost-of-living allowance",
        section: Some(Section::Allowance),
        aliases: &[],
        kind: CategoryKind::Entitlement,
        criticality: Criticality::Standard,
        default_threshold_cents: 2_500,
        suggestion: "Verify the COLA index for your duty station and your dependency status",
        ref_url: Some(DTMO_COLA),
    },
    special_pay("HFP", "Hostile fire pay"),
    special_pay("HDP", "Hardship duty pay"),
    special_pay("ACIP", "Aviation incentive pay"),
    special_pay("CSP", "Career sea pay"),
    special_pay("HDIP", "Hazardous duty incentive pay"),
    special_pay("SDAP", "Special duty assignment pay"),
    CategorySpec {
        code: "TSP",
        label: "TSP contribution",
        section: Some(Section::Deduction),
        aliases: &[],
        kind: CategoryKind::Deduction,
        criticality: Criticality::Standard,
        default_threshold_cents: 500,
        suggestion: "Compare your TSP election in myPay with the percentage actually withheld",
        ref_url: Some(TSP),
    },
    CategorySpec {
        code: "SGLI",
        label: "SGLI premium",
        section: Some(Section::Deduction),
        aliases: &[],
        kind: CategoryKind::Deduction,
        criticality: Criticality::Standard,
        default_threshold_cents: 200,
        suggestion: "Verify your SGLI coverage election in SOES",
        ref_url: Some(SGLI),
    },
    CategorySpec {
        code: "DENTAL",
        label: "Dental premium",
        section: Some(Section::Deduction),
        aliases: &["TDP"],
        kind: CategoryKind::Deduction,
        criticality: Criticality::Standard,
        default_threshold_cents: 200,
        suggestion: "Verify your dental plan enrollment tier",
        ref_url: Some(DENTAL),
    },
    CategorySpec {
        code: "FICA",
        label: "Social Security tax",
        section: Some(Section::Tax),
        aliases: &["FICA_SS", "OASDI"],
        kind: CategoryKind::Tax,
        criticality: Criticality::Standard,
        default_threshold_cents: 300,
        suggestion: "Social Security is a flat percentage of taxable pay; ask finance to review the withholding",
        ref_url: None,
    },
    CategorySpec {
        code: "MEDICARE",
        label: "Medicare tax",
        section: Some(Section::Tax),
        aliases: &["FICA_MED"],
        kind: CategoryKind::Tax,
        criticality: Criticality::Standard,
        default_threshold_cents: 100,
        suggestion: "Medicare is a flat percentage of taxable pay; ask finance to review the withholding",
        ref_url: None,
    },
    CategorySpec {
        code: "FITW",
        label: "Federal income tax",
        section: Some(Section::Tax),
        aliases: &[],
        kind: CategoryKind::EstimatedTax,
        criticality: Criticality::Standard,
        default_threshold_cents: 15_000,
        suggestion: "Federal withholding is an estimate; review your W-4 elections if the gap persists",
        ref_url: Some(IRS_WITHHOLDING),
    },
    CategorySpec {
        code: "SITW",
        label: "State income tax",
        section: Some(Section::Tax),
        aliases: &[],
        kind: CategoryKind::EstimatedTax,
        criticality: Criticality::Standard,
        default_threshold_cents: 10_000,
        suggestion: "State withholding is an estimate; verify your state of legal residence (DD 2058)",
        ref_url: None,
    },
];

/// The terminal net pay check.
pub const NET_PAY: CategorySpec = CategorySpec {
    code: "NET_PAY",
    label: "Net pay",
    section: None,
    aliases: &[],
    kind: CategoryKind::NetPay,
    criticality: Criticality::Critical,
    default_threshold_cents: 5_000,
    suggestion: "Review the flagged categories above, then contact your finance office with this statement",
    ref_url: None,
};

/// Looks up a category by code, including net pay.
pub fn category(code: &str) -> Option<&'static CategorySpec> {
    CATEGORIES
        .iter()
        .chain(std::iter::once(&NET_PAY))
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpecialPayKind;

    #[test]
    fn test_every_special_pay_kind_has_a_category() {
        for kind in SpecialPayKind::ALL {
            let spec = category(kind.code()).unwrap();
            assert_eq!(spec.kind, CategoryKind::Entitlement);
        }
    }

    #[test]
    fn test_category_codes_are_unique() {
        let mut codes: Vec<&str> = CATEGORIES.iter().map(|c| c.code).collect();
        codes.push(NET_PAY.code);
        let len = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), len);
    }

    #[test]
    fn test_accepts_aliases_case_insensitively() {
        let fica = category("FICA").unwrap();
        assert!(fica.accepts_code("fica_ss"));
        assert!(fica.accepts_code("FICA"));
        assert!(!fica.accepts_code("FICA_MED"));
    }

    #[test]
    fn test_estimated_taxes_have_the_widest_tolerance() {
        let widest_precise = CATEGORIES
            .iter()
            .filter(|c| c.kind == CategoryKind::Tax)
            .map(|c| c.default_threshold_cents)
            .max()
            .unwrap();
        for spec in CATEGORIES.iter().filter(|c| c.kind == CategoryKind::EstimatedTax) {
            assert!(spec.default_threshold_cents > widest_precise);
        }
    }

    #[test]
    fn test_net_pay_is_not_in_the_ordered_list() {
        assert!(CATEGORIES.iter().all(|c| c.code != "NET_PAY"));
        assert_eq!(category("net_pay").unwrap().kind, CategoryKind::NetPay);
    }
}
