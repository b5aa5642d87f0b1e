//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate tables and
//! threshold overrides from YAML files.

use std::fs;
use std::path::Path;

use crate::comparison::ThresholdConfig;
use crate::error::{ReconError, ReconResult};
use crate::lookup::TaxParameters;

use super::tables::RateTables;
use super::types::{BasePayTable, LocationRatesFile, PremiumsFile, StateTaxFile};

/// Loads and provides access to rate tables.
///
/// # Directory Structure
///
/// The rate table directory should have the following structure:
/// ```text
/// config/rates/
/// ├── housing.yaml        # Housing allowance rows
/// ├── cola.yaml           # Cost-of-living allowance rows
/// ├── sgli.yaml           # Life insurance premiums by coverage
/// ├── state_tax.yaml      # State income tax rules
/// ├── base_pay/
/// │   └── 2025-01-01.yaml # Base pay table effective from this date
/// └── tax/
///     └── 2025.yaml       # Payroll tax parameters for this year
/// ```
///
/// # Example
///
/// ```no_run
/// use pay_recon::config::ConfigLoader;
/// use pay_recon::lookup::RateLookup;
/// use pay_recon::models::PayGrade;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/rates").unwrap();
/// let grade = PayGrade::parse("E05").unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// let base = loader.tables().base_pay(&grade, 6, as_of).unwrap();
/// println!("Base pay: {:?} cents", base);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: RateTables,
}

impl ConfigLoader {
    /// Loads rate tables from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file or directory is missing
    /// - Any file contains invalid YAML
    /// - Any table names an unrecognized pay grade
    pub fn load<P: AsRef<Path>>(path: P) -> ReconResult<Self> {
        let path = path.as_ref();

        let base_pay = Self::load_dir::<BasePayTable>(&path.join("base_pay"))?;
        let housing = Self::load_yaml::<LocationRatesFile>(&path.join("housing.yaml"))?;
        let cola = Self::load_yaml::<LocationRatesFile>(&path.join("cola.yaml"))?;
        let premiums = Self::load_yaml::<PremiumsFile>(&path.join("sgli.yaml"))?;
        let tax = Self::load_dir::<TaxParameters>(&path.join("tax"))?;
        let state_tax = Self::load_yaml::<StateTaxFile>(&path.join("state_tax.yaml"))?;

        let tables = RateTables::new(
            base_pay,
            housing.rates,
            cola.rates,
            premiums.premiums,
            tax,
            state_tax.states,
        )
        .map_err(|e| ReconError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            base_pay_tables = tables.base_pay_tables().len(),
            tax_years = ?tables.tax_years(),
            "Loaded rate tables"
        );

        Ok(Self { tables })
    }

    /// Loads threshold overrides from a YAML file.
    ///
    /// Returns `InvalidThreshold` if any override is negative.
    pub fn load_thresholds<P: AsRef<Path>>(path: P) -> ReconResult<ThresholdConfig> {
        let raw = Self::load_yaml::<ThresholdConfig>(path.as_ref())?;
        let thresholds = ThresholdConfig::default().merged_with(&raw);
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Returns the loaded rate tables.
    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Consumes the loader, returning the rate tables.
    pub fn into_tables(self) -> RateTables {
        self.tables
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ReconResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReconError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ReconError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every YAML file in a directory.
    fn load_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> ReconResult<Vec<T>> {
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(ReconError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| ReconError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut items = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| ReconError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                items.push(Self::load_yaml::<T>(&path)?);
            }
        }

        if items.is_empty() {
            return Err(ReconError::ConfigNotFound {
                path: format!("{} (no YAML files found)", dir_str),
            });
        }

        Ok(items)
    }
}
