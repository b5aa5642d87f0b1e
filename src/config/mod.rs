//! Configuration loading and management for the Pay Reconciliation Engine.
//!
//! This module loads the reference rate tables (base pay, housing, cost of
//! living, insurance premiums, payroll tax parameters and state tax rules)
//! from YAML files and exposes them through the [`crate::lookup::RateLookup`]
//! trait.
//!
//! # Example
//!
//! ```no_run
//! use pay_recon::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/rates").unwrap();
//! println!("Tax years loaded: {:?}", loader.tables().tax_years());
//! ```

mod loader;
mod tables;
mod types;

pub use loader::ConfigLoader;
pub use tables::RateTables;
pub use types::{
    BasePayStep, BasePayTable, LocationRateRow, LocationRatesFile, PremiumRow, PremiumsFile,
    StateTaxFile, StateTaxRow,
};
