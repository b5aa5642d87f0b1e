//! Comparison and flagging.
//!
//! Takes the line items of a parsed pay statement and an expected snapshot,
//! and produces one finding per evaluated category plus aggregate totals.

pub mod catalog;
mod engine;
mod messages;
mod thresholds;
mod totals;

pub use catalog::{CATEGORIES, CategoryKind, CategorySpec, Criticality, NET_PAY, category};
pub use engine::{ALL_VERIFIED, compare};
pub use messages::format_cents;
pub use thresholds::{FALLBACK_THRESHOLD_CENTS, ThresholdConfig};
pub use totals::{actual_net_pay, compute_totals};
