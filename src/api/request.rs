//! Request types for the Pay Reconciliation Engine API.
//!
//! This module defines the JSON request bodies for the `/expected-pay` and
//! `/reconcile` endpoints.

use serde::{Deserialize, Serialize};

use crate::comparison::ThresholdConfig;
use crate::models::{LineItem, MemberProfile, PayPeriod};
use crate::reconcile::SanityPolicy;

/// Request body for the `/expected-pay` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedPayRequest {
    /// The member whose pay is being computed.
    pub profile: MemberProfile,
    /// The month to compute.
    pub period: PayPeriod,
    /// What to do with an implausible rank and tenure. Defaults to blocking.
    #[serde(default)]
    pub sanity_policy: SanityPolicy,
}

/// Request body for the `/reconcile` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// The member the statement belongs to.
    pub profile: MemberProfile,
    /// The month the statement covers.
    pub period: PayPeriod,
    /// Parsed statement rows.
    pub line_items: Vec<LineItem>,
    /// Per-category overrides layered on the server's thresholds.
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// What to do with an implausible rank and tenure. Defaults to blocking.
    #[serde(default)]
    pub sanity_policy: SanityPolicy,
}
