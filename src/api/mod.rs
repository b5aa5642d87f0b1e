//! HTTP API module for the Pay Reconciliation Engine.
//!
//! This module exposes expected pay computation and statement reconciliation
//! as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExpectedPayRequest, ReconcileRequest};
pub use response::{ApiError, ExpectedPayResponse};
pub use state::AppState;
