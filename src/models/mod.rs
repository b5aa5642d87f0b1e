//! Core data models for the Pay Reconciliation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod comparison_result;
mod line_item;
mod pay_period;
mod profile;
mod snapshot;

pub use comparison_result::{
    BucketTotals, ComparisonResult, NetPayTotals, PayFlag, Severity, Totals,
};
pub use line_item::{LineItem, Section};
pub use pay_period::PayPeriod;
pub use profile::{
    DentalPlan, FilingStatus, GradeKind, MemberProfile, PayGrade, SpecialPayElection,
    SpecialPayKind,
};
pub use snapshot::{DiagnosticKind, ExpectedSnapshot, SnapshotDiagnostic, SpecialPayAmount};

pub(crate) use snapshot::saturating_sum;
