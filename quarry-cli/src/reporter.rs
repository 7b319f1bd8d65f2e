//! Console rendering of the outcome stream.

use colored::Colorize;

use quarry_provision::{OperationOutcome, Reporter, ResourceKind, RunReport, StepOutcome};

/// Renders each step as a colored console line, or as one JSON object per
/// line when `json` is set. Suppressed steps (expected branch duplicates on
/// re-runs) are omitted from console output but kept in JSON.
pub struct ConsoleReporter {
    json: bool,
}

impl ConsoleReporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Final aggregate line; always printed, even for an all-failed run.
    pub fn summary(&self, report: &RunReport) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "created": report.created(),
                    "already_exists": report.already_exists(),
                    "failed": report.failed(),
                })
            );
            return;
        }
        let line = format!(
            "{} created, {} existing, {} failed",
            report.created(),
            report.already_exists(),
            report.failed()
        );
        if report.failed() > 0 {
            println!("{}", line.red());
        } else {
            println!("{}", line.green());
        }
    }

    fn indent(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Project => "",
            ResourceKind::Repository => "  ",
            ResourceKind::InitialCommit | ResourceKind::Branch | ResourceKind::BranchProtection => {
                "    "
            }
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, step: &StepOutcome) {
        if self.json {
            // One structured event per line; suppressed steps stay visible
            // to machine consumers.
            if let Ok(line) = serde_json::to_string(step) {
                println!("{line}");
            }
            return;
        }
        if step.suppressed {
            return;
        }
        let indent = Self::indent(step.kind);
        let message = step.outcome.message();
        match &step.outcome {
            OperationOutcome::Created { .. } => println!("{indent}{}", message.green()),
            OperationOutcome::AlreadyExists { .. } => println!("{indent}{}", message.yellow()),
            OperationOutcome::Failed { .. } => println!("{indent}{}", message.red()),
        }
    }
}
