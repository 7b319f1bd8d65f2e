//! # quarry-provision
//!
//! Bulk provisioning and teardown orchestration.
//!
//! Call [`provision::provision`] to walk a manifest and create projects,
//! repositories, branches, and branch protection in dependency order, or
//! [`teardown::teardown`] to delete it all best-effort. Ambiguous create
//! responses are resolved by [`classify`]; every step lands in the outcome
//! stream as a [`StepOutcome`].

pub mod classify;
pub mod outcome;
pub mod pipeline;
pub mod provision;
pub mod teardown;

pub use classify::{classify_create, ClassifierConfig};
pub use outcome::{
    OperationOutcome, Reporter, ResourceKind, RunReport, SilentReporter, StepOutcome,
};
pub use pipeline::{run, RunMode};
