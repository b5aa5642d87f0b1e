//! Configuration types for rate tables.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML files of a rate table directory.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

use crate::lookup::StateTaxRule;

/// One step of a base pay table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BasePayStep {
    /// Minimum completed years of service for this step.
    pub years: u32,
    /// Monthly basic pay in cents.
    pub monthly_cents: i64,
}

/// A base pay table effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct BasePayTable {
    /// The date this table takes effect.
    pub effective_date: NaiveDate,
    /// Map of grade code (e.g. "E05") to its years-of-service steps.
    pub grades: HashMap<String, Vec<BasePayStep>>,
}

/// One row of a location-keyed allowance table (housing or COLA).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationRateRow {
    /// Grade code the rate applies to.
    pub grade: String,
    /// Housing market area or postal code.
    pub location: String,
    /// Whether this is the with-dependents rate.
    pub with_dependents: bool,
    /// The date this rate takes effect.
    pub effective_date: NaiveDate,
    /// Monthly amount in cents.
    pub monthly_cents: i64,
}

/// File structure of `housing.yaml` and `cola.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRatesFile {
    /// All rows in the file.
    pub rates: Vec<LocationRateRow>,
}

/// One row of the insurance premium table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PremiumRow {
    /// Coverage amount in cents.
    pub coverage_cents: i64,
    /// Monthly premium in cents.
    pub premium_cents: i64,
}

/// File structure of `sgli.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumsFile {
    /// All premium rows.
    pub premiums: Vec<PremiumRow>,
}

/// A state tax rule for a state, effective from a tax year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateTaxRow {
    /// Two-letter state code.
    pub state: String,
    /// First tax year the rule applies to.
    pub year: i32,
    /// How the state taxes military pay.
    pub rule: StateTaxRule,
}

/// File structure of `state_tax.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StateTaxFile {
    /// All state rows.
    pub states: Vec<StateTaxRow>,
}
