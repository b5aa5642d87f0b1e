//! HTTP request handlers for the Pay Reconciliation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ReconError;
use crate::reconcile::{expected_pay, reconcile};

use super::request::{ExpectedPayRequest, ReconcileRequest};
use super::response::{ApiError, ApiErrorResponse, ExpectedPayResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/expected-pay", post(expected_pay_handler))
        .route("/reconcile", post(reconcile_handler))
        .with_state(state)
}

/// Handler for POST /expected-pay.
///
/// Returns the rank/tenure verdict and the expected pay snapshot.
async fn expected_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExpectedPayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing expected pay request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match expected_pay(
        &request.profile,
        &request.period,
        state.rates(),
        request.sanity_policy,
    ) {
        Ok((sanity, snapshot)) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %request.profile.member_id,
                period = %request.period,
                sane = sanity.valid,
                absent_categories = snapshot.diagnostics.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Expected pay computed"
            );
            json_response(StatusCode::OK, &ExpectedPayResponse { sanity, snapshot })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /reconcile.
///
/// Reconciles the posted statement against the member's expected pay. The
/// request's threshold overrides are layered over the server's.
async fn reconcile_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconcile request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.thresholds.validate() {
        return error_response(correlation_id, err);
    }
    let thresholds = state.thresholds().merged_with(&request.thresholds);

    let start_time = Instant::now();
    match reconcile(
        &request.profile,
        &request.period,
        &request.line_items,
        state.rates(),
        &thresholds,
        request.sanity_policy,
    ) {
        Ok(reconciliation) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %request.profile.member_id,
                period = %request.period,
                line_items = request.line_items.len(),
                flags = reconciliation.result.flags.len(),
                worst_severity = ?reconciliation.result.worst_severity(),
                duration_us = start_time.elapsed().as_micros(),
                "Reconciliation completed successfully"
            );
            json_response(StatusCode::OK, &reconciliation)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: ReconError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
