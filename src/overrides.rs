//! Override Application
//!
//! Path-addressed replacement of leaf values in a parameter tree. Single
//! overrides apply atomically; plans bundle several and apply them with
//! all-or-nothing semantics, including disabled entries that are validated
//! but never written.

pub mod applier;
pub mod plan;

pub use applier::{apply, check};
pub use plan::{Override, OverridePlan, PlanSummary};
