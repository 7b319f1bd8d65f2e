//! Teardown orchestration.
//!
//! Deletion order per project: declared repositories first (each attempt
//! independent), then the project itself regardless of how the repository
//! deletions went. Best-effort throughout — nothing is retried, nothing
//! aborts the run.

use quarry_core::types::Manifest;
use quarry_client::{ClientError, RawResponse, WorkspaceResourceClient};

use crate::outcome::{OperationOutcome, Reporter, ResourceKind, RunReport, StepOutcome};

/// Tear down every resource the manifest declares.
pub fn teardown(
    client: &dyn WorkspaceResourceClient,
    workspace: &str,
    manifest: &Manifest,
    reporter: &mut dyn Reporter,
) -> RunReport {
    let mut report = RunReport::default();

    for project in &manifest.projects {
        for repo in &project.repositories {
            let outcome = match client.delete_repository(workspace, &repo.slug) {
                Ok(resp) => classify_delete(&format!("repository '{}'", repo.slug), &resp),
                Err(err) => transport_failure(&format!("repository '{}'", repo.slug), err),
            };
            report.record(
                reporter,
                StepOutcome::new(ResourceKind::Repository, repo.slug.to_string(), outcome),
            );
        }

        let outcome = match client.delete_project(workspace, &project.key) {
            Ok(resp) => classify_delete(&format!("project '{}'", project.key), &resp),
            Err(err) => transport_failure(&format!("project '{}'", project.key), err),
        };
        report.record(
            reporter,
            StepOutcome::new(ResourceKind::Project, project.key.to_string(), outcome),
        );
    }

    report
}

/// For deletes, `Created` reads as "removed" and `AlreadyExists` as "already
/// absent" — both mean the desired end state was reached.
fn classify_delete(resource: &str, resp: &RawResponse) -> OperationOutcome {
    match resp.status {
        204 => OperationOutcome::created(format!("{resource} deleted")),
        404 => OperationOutcome::already_exists(format!("{resource} already absent")),
        _ => OperationOutcome::failed(
            format!("failed to delete {resource} (HTTP {})", resp.status),
            Some(resp.body.clone()),
        ),
    }
}

fn transport_failure(resource: &str, err: ClientError) -> OperationOutcome {
    OperationOutcome::failed(format!("transport failure for {resource}: {err}"), None)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delete_204_reads_as_removed() {
        let outcome = classify_delete("repository 'a'", &RawResponse::empty(204));
        assert!(matches!(outcome, OperationOutcome::Created { .. }));
        assert_eq!(outcome.message(), "repository 'a' deleted");
    }

    #[test]
    fn delete_404_reads_as_already_absent() {
        let outcome = classify_delete("project 'TEST'", &RawResponse::empty(404));
        assert!(matches!(outcome, OperationOutcome::AlreadyExists { .. }));
    }

    #[test]
    fn delete_other_status_is_failed_with_body() {
        let body = json!({"error": {"message": "forbidden"}});
        let outcome = classify_delete("project 'TEST'", &RawResponse::new(403, body.clone()));
        match outcome {
            OperationOutcome::Failed { detail, .. } => assert_eq!(detail, Some(body)),
            other => panic!("expected Failed, got: {other:?}"),
        }
    }
}
