//! Structured per-step outcomes and the outcome stream.
//!
//! Every orchestration step — one remote resource touched — produces exactly
//! one [`StepOutcome`]. Failures are data in this stream, never errors thrown
//! past the orchestrator; the run as a whole always reaches completion.

use serde::Serialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Operation outcome
// ---------------------------------------------------------------------------

/// Result of a single resource operation.
///
/// For teardown steps the variants read slightly differently: `Created`
/// means the resource was removed, `AlreadyExists` means it was already
/// absent. Both count as the desired state being reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OperationOutcome {
    Created {
        message: String,
    },
    AlreadyExists {
        message: String,
    },
    Failed {
        message: String,
        /// Raw error payload from the platform, when one was returned.
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<Value>,
    },
}

impl OperationOutcome {
    pub fn created(message: impl Into<String>) -> Self {
        Self::Created {
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>, detail: Option<Value>) -> Self {
        Self::Failed {
            message: message.into(),
            detail,
        }
    }

    /// `Created` and `AlreadyExists` both satisfy the next step's
    /// precondition: the resource is there.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Created { message }
            | Self::AlreadyExists { message }
            | Self::Failed { message, .. } => message,
        }
    }
}

// ---------------------------------------------------------------------------
// Step outcome
// ---------------------------------------------------------------------------

/// The kind of remote resource a step touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Project,
    Repository,
    InitialCommit,
    Branch,
    BranchProtection,
}

/// One entry in the outcome stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub kind: ResourceKind,
    /// Addressing identifier: project key, repo slug, or `slug/branch`.
    pub id: String,
    pub outcome: OperationOutcome,
    /// Marks the one expected, harmless case the reporter should not surface
    /// as noise: a declared branch that already existed on a re-run.
    pub suppressed: bool,
}

impl StepOutcome {
    pub fn new(kind: ResourceKind, id: impl Into<String>, outcome: OperationOutcome) -> Self {
        Self {
            kind,
            id: id.into(),
            outcome,
            suppressed: false,
        }
    }

    pub fn suppressed(mut self) -> Self {
        self.suppressed = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// Consumer of the outcome stream, injected into the orchestrators.
///
/// Implementations render to console, logs, or nothing at all (tests).
pub trait Reporter {
    fn report(&mut self, step: &StepOutcome);
}

/// A reporter that discards everything.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _step: &StepOutcome) {}
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Aggregate of a whole provisioning or teardown run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    /// Append a step and feed it to the reporter in one motion.
    pub(crate) fn record(&mut self, reporter: &mut dyn Reporter, step: StepOutcome) {
        reporter.report(&step);
        self.steps.push(step);
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, OperationOutcome::Created { .. }))
    }

    pub fn already_exists(&self) -> usize {
        self.count(|o| matches!(o, OperationOutcome::AlreadyExists { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, OperationOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&OperationOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(&s.outcome)).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
