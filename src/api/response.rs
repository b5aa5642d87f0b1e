//! Response types for the Pay Reconciliation Engine API.
//!
//! This module defines the success and error response bodies, and how
//! [`ReconError`] maps onto HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::SanityVerdict;
use crate::error::ReconError;
use crate::models::ExpectedSnapshot;

/// Response body for the `/expected-pay` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedPayResponse {
    /// Rank/tenure plausibility of the profile.
    pub sanity: SanityVerdict,
    /// The expected pay snapshot.
    pub snapshot: ExpectedSnapshot,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ReconError> for ApiErrorResponse {
    fn from(error: ReconError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            ReconError::ConfigNotFound { .. } | ReconError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            ReconError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PERIOD",
                    message,
                    "The period must name a month between 1 and 12 of a positive year",
                ),
            ),
            ReconError::InvalidProfile { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PROFILE", message),
            ),
            ReconError::InvalidThreshold { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_THRESHOLD", message),
            ),
            ReconError::ImplausibleProfile { explanation, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details("IMPLAUSIBLE_PROFILE", message, explanation),
            ),
            ReconError::LookupFailed { .. } | ReconError::CalculationError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
