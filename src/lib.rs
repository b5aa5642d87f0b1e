//! Pay Reconciliation Engine for military pay statements.
//!
//! This crate computes what a service member's monthly pay *should* be from their
//! profile and published rate tables, compares it against the line items of an
//! actual pay statement, and reports prioritized discrepancy flags plus reconciled
//! totals.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod comparison;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod reconcile;
