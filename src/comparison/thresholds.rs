//! Materiality thresholds.
//!
//! A difference between expected and actual whose magnitude is at most the
//! category's threshold is treated as verified. Defaults live in the category
//! catalog; callers override individual categories through
//! [`ThresholdConfig`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ReconError, ReconResult};

use super::catalog;

/// Fallback for codes that have no catalog entry.
pub const FALLBACK_THRESHOLD_CENTS: i64 = 1_000;

/// Per-category threshold overrides on top of the catalog defaults.
///
/// | Category | Default |
/// |---|---|
/// | BASE_PAY, BAH, NET_PAY | $50.00 |
/// | COLA | $25.00 |
/// | BAS, special pays | $10.00 |
/// | TSP | $5.00 |
/// | FICA | $3.00 |
/// | SGLI, DENTAL | $2.00 |
/// | MEDICARE | $1.00 |
/// | FITW | $150.00 |
/// | SITW | $100.00 |
///
/// # Example
///
/// ```
/// use pay_recon::comparison::ThresholdConfig;
///
/// let thresholds = ThresholdConfig::default().with_override("bah", 2_500);
/// assert_eq!(thresholds.threshold_for("BAH"), 2_500);
/// assert_eq!(thresholds.threshold_for("FICA"), 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Map of category code to threshold in cents.
    #[serde(default)]
    pub overrides: BTreeMap<String, i64>,
}

impl ThresholdConfig {
    /// Returns a copy with one category overridden.
    pub fn with_override(mut self, code: &str, cents: i64) -> Self {
        self.overrides.insert(code.to_ascii_uppercase(), cents);
        self
    }

    /// Returns the threshold for a category code.
    pub fn threshold_for(&self, code: &str) -> i64 {
        let code = code.to_ascii_uppercase();
        if let Some(&cents) = self.overrides.get(&code) {
            return cents;
        }
        catalog::category(&code)
            .map(|c| c.default_threshold_cents)
            .unwrap_or(FALLBACK_THRESHOLD_CENTS)
    }

    /// Rejects negative overrides.
    pub fn validate(&self) -> ReconResult<()> {
        match self.overrides.iter().find(|(_, cents)| **cents < 0) {
            Some((code, cents)) => Err(ReconError::InvalidThreshold {
                code: code.clone(),
                cents: *cents,
            }),
            None => Ok(()),
        }
    }

    /// Layers `other`'s overrides on top of this configuration.
    pub fn merged_with(&self, other: &ThresholdConfig) -> ThresholdConfig {
        let mut overrides = self.overrides.clone();
        for (code, cents) in &other.overrides {
            overrides.insert(code.to_ascii_uppercase(), *cents);
        }
        ThresholdConfig { overrides }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_catalog() {
        let t = ThresholdConfig::default();
        assert_eq!(t.threshold_for("BAH"), 5_000);
        assert_eq!(t.threshold_for("BAS"), 1_000);
        assert_eq!(t.threshold_for("MEDICARE"), 100);
        assert_eq!(t.threshold_for("FITW"), 15_000);
        assert_eq!(t.threshold_for("NET_PAY"), 5_000);
        assert_eq!(t.threshold_for("HFP"), 1_000);
    }

    #[test]
    fn test_unknown_code_uses_fallback() {
        assert_eq!(
            ThresholdConfig::default().threshold_for("MYSTERY"),
            FALLBACK_THRESHOLD_CENTS
        );
    }

    #[test]
    fn test_override_is_case_insensitive() {
        let t = ThresholdConfig::default().with_override("sitw", 0);
        assert_eq!(t.threshold_for("SITW"), 0);
        assert_eq!(t.threshold_for("sitw"), 0);
    }

    #[test]
    fn test_negative_override_is_rejected() {
        let t = ThresholdConfig::default().with_override("BAH", -5);
        let err = t.validate().unwrap_err();
        assert!(matches!(err, ReconError::InvalidThreshold { cents: -5, .. }));
        assert!(ThresholdConfig::default().validate().is_ok());
    }

    #[test]
    fn test_merge_prefers_later_overrides() {
        let base = ThresholdConfig::default()
            .with_override("BAH", 1_000)
            .with_override("BAS", 200);
        let request = ThresholdConfig::default().with_override("bah", 9_000);
        let merged = base.merged_with(&request);
        assert_eq!(merged.threshold_for("BAH"), 9_000);
        assert_eq!(merged.threshold_for("BAS"), 200);
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "overrides:\n  BAH: 2500\n  FITW: 20000\n";
        let t: ThresholdConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(t.threshold_for("BAH"), 2_500);
        assert_eq!(t.threshold_for("FITW"), 20_000);
    }
}
