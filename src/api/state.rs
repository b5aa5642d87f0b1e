//! Application state for the Pay Reconciliation Engine API.

use std::sync::Arc;

use crate::comparison::ThresholdConfig;
use crate::config::RateTables;

/// Shared application state.
///
/// Holds the loaded rate tables and the server-wide threshold overrides that
/// every request's own overrides are layered on.
#[derive(Clone)]
pub struct AppState {
    rates: Arc<RateTables>,
    thresholds: Arc<ThresholdConfig>,
}

impl AppState {
    /// Creates application state with default thresholds.
    pub fn new(rates: RateTables) -> Self {
        Self::with_thresholds(rates, ThresholdConfig::default())
    }

    /// Creates application state with server-wide threshold overrides.
    pub fn with_thresholds(rates: RateTables, thresholds: ThresholdConfig) -> Self {
        Self {
            rates: Arc::new(rates),
            thresholds: Arc::new(thresholds),
        }
    }

    /// Returns the rate tables.
    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    /// Returns the server-wide thresholds.
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }
}
