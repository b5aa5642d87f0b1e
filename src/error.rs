//! Error types for the Pay Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Most "no data" conditions never reach this type as a hard failure: the
//! snapshot builder turns them into absent categories. Errors that escape to
//! callers are reserved for invalid call shapes and configuration problems.

use thiserror::Error;

/// The main error type for the Pay Reconciliation Engine.
///
/// # Example
///
/// ```
/// use pay_recon::error::ReconError;
///
/// let error = ReconError::InvalidPeriod { year: 2025, month: 13 };
/// assert_eq!(error.to_string(), "Invalid pay period: month 13 of year 2025");
/// ```
#[derive(Debug, Error)]
pub enum ReconError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested pay period is not a real calendar month.
    #[error("Invalid pay period: month {month} of year {year}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A member profile field was malformed.
    #[error("Invalid profile field '{field}': {message}")]
    InvalidProfile {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A rate lookup adapter failed (as opposed to finding nothing).
    #[error("Lookup in table '{table}' failed: {message}")]
    LookupFailed {
        /// The rate table that was being queried.
        table: String,
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// A materiality threshold override was negative.
    #[error("Invalid threshold for '{code}': {cents} cents")]
    InvalidThreshold {
        /// The category code the override was for.
        code: String,
        /// The rejected value.
        cents: i64,
    },

    /// The pay grade and years of service failed the sanity check and the
    /// caller asked for implausible profiles to be blocked.
    #[error("Implausible profile {pay_grade} with {years_of_service} years of service: {explanation}")]
    ImplausibleProfile {
        /// The pay grade as supplied.
        pay_grade: String,
        /// The years of service as supplied.
        years_of_service: u32,
        /// Why the combination was rejected.
        explanation: String,
    },
}

/// A type alias for Results that return ReconError.
pub type ReconResult<T> = Result<T, ReconError>;
