//! Provisioning orchestration.
//!
//! Walks the manifest in document order and drives each repository through
//! its dependency chain:
//!
//! ```text
//! project → repository → initial commit → branches → protection of main
//! ```
//!
//! Continue-on-error policy: nothing aborts the run. A failed project create
//! skips that project's repositories; a failed repository create skips that
//! repository's remaining steps; everything else is independent and always
//! attempted. Execution is strictly sequential — the chain above is a true
//! dependency order, and the platform rate-limits aggressively.

use quarry_core::types::{BranchName, Manifest, ProjectSpec, RepositorySpec};
use quarry_client::{ClientError, RawResponse, WorkspaceResourceClient};

use crate::classify::{classify_create, ClassifierConfig};
use crate::outcome::{OperationOutcome, Reporter, ResourceKind, RunReport, StepOutcome};

/// Base branch every declared branch is cut from, and the only branch ever
/// considered for protection.
pub const BASE_BRANCH: &str = "main";

/// Token the platform embeds in branch-create rejections for duplicates.
const BRANCH_EXISTS_TOKEN: &str = "BRANCH_ALREADY_EXISTS";

/// Provision every project in the manifest against `workspace`.
///
/// Always runs to completion; per-resource failures are recorded in the
/// returned [`RunReport`] and streamed to `reporter` as they happen.
pub fn provision(
    client: &dyn WorkspaceResourceClient,
    workspace: &str,
    manifest: &Manifest,
    config: &ClassifierConfig,
    reporter: &mut dyn Reporter,
) -> RunReport {
    let mut report = RunReport::default();

    for project in &manifest.projects {
        let label = format!("project '{}'", project.key);
        let outcome = match client.create_project(
            workspace,
            &project.key,
            &project.name,
            &project.description,
        ) {
            Ok(resp) => classify_create(&label, &resp, config),
            Err(err) => transport_failure(&label, err),
        };
        let project_ok = outcome.is_success();
        report.record(
            reporter,
            StepOutcome::new(ResourceKind::Project, project.key.to_string(), outcome),
        );

        if !project_ok {
            tracing::warn!(
                "skipping {} repositories of project '{}' after create failure",
                project.repositories.len(),
                project.key
            );
            continue;
        }

        for repo in &project.repositories {
            provision_repository(client, workspace, project, repo, config, reporter, &mut report);
        }
    }

    report
}

/// Drive one repository through create → commit → branches → protection.
///
/// The per-repository state progression lives entirely in this function's
/// locals; nothing is shared across repositories.
fn provision_repository(
    client: &dyn WorkspaceResourceClient,
    workspace: &str,
    project: &ProjectSpec,
    repo: &RepositorySpec,
    config: &ClassifierConfig,
    reporter: &mut dyn Reporter,
    report: &mut RunReport,
) {
    let label = format!("repository '{}'", repo.slug);

    // Step a: create the repository.
    let outcome = match client.create_repository(workspace, &project.key, &repo.slug, repo.is_private)
    {
        Ok(resp) => classify_create(&label, &resp, config),
        Err(err) => transport_failure(&label, err),
    };
    let repo_pre_existing = matches!(outcome, OperationOutcome::AlreadyExists { .. });
    let repo_ok = outcome.is_success();
    report.record(
        reporter,
        StepOutcome::new(ResourceKind::Repository, repo.slug.to_string(), outcome),
    );
    if !repo_ok {
        return;
    }

    // Step b: seed an initial commit. The platform exposes no default branch
    // (and rejects branch creation) until at least one commit exists.
    let base = BranchName::from(BASE_BRANCH);
    let commit_outcome = match client.push_initial_commit(workspace, &repo.slug, &base) {
        Ok(resp) if resp.is_success() => {
            OperationOutcome::created(format!("initial commit pushed to '{}'", repo.slug))
        }
        Ok(resp) => OperationOutcome::failed(
            format!(
                "failed to push initial commit to '{}' (HTTP {})",
                repo.slug, resp.status
            ),
            Some(resp.body),
        ),
        Err(err) => transport_failure(&format!("initial commit in '{}'", repo.slug), err),
    };
    let commit_ok = commit_outcome.is_success();
    report.record(
        reporter,
        StepOutcome::new(ResourceKind::InitialCommit, repo.slug.to_string(), commit_outcome),
    );

    // A pre-existing repository already has commits, so a rejected seed
    // commit there does not block branch creation. For a fresh repository it
    // does: there is nothing to cut branches from.
    if !commit_ok && !repo_pre_existing {
        tracing::warn!(
            "skipping branch creation for '{}': no initial commit",
            repo.slug
        );
        return;
    }

    // Step c: declared branches, in order, each independent of its siblings.
    let mut main_available = false;
    for branch in &repo.branches {
        let created = create_branch(client, workspace, repo, branch, reporter, report);
        if created && branch.0 == BASE_BRANCH {
            main_available = true;
        }
    }

    // Step d: protect main, when declared and present. A declared main that
    // never became available still gets a reported skip, not silence.
    if repo.branches.iter().any(|b| b.0 == BASE_BRANCH) {
        if main_available {
            protect_main(client, workspace, repo, reporter, report);
        } else {
            report.record(
                reporter,
                StepOutcome::new(
                    ResourceKind::BranchProtection,
                    format!("{}/{BASE_BRANCH}", repo.slug),
                    OperationOutcome::failed(
                        format!(
                            "branch '{BASE_BRANCH}' was not created in '{}'; protection skipped",
                            repo.slug
                        ),
                        None,
                    ),
                ),
            );
        }
    }
}

/// Create one declared branch from the base branch. Returns whether the
/// branch is available afterwards (freshly created or already there).
fn create_branch(
    client: &dyn WorkspaceResourceClient,
    workspace: &str,
    repo: &RepositorySpec,
    branch: &BranchName,
    reporter: &mut dyn Reporter,
    report: &mut RunReport,
) -> bool {
    let id = format!("{}/{}", repo.slug, branch);
    let base = BranchName::from(BASE_BRANCH);

    // Resolve the base branch's latest commit first; a missing base is a
    // non-fatal per-branch failure.
    let target_hash = match client.read_branch(workspace, &repo.slug, &base) {
        Ok(resp) if resp.status == 200 => resp.target_hash().map(str::to_owned),
        Ok(_) => None,
        Err(err) => {
            report.record(
                reporter,
                StepOutcome::new(
                    ResourceKind::Branch,
                    id,
                    transport_failure(&format!("branch '{branch}'"), err),
                ),
            );
            return false;
        }
    };
    let Some(target_hash) = target_hash else {
        report.record(
            reporter,
            StepOutcome::new(
                ResourceKind::Branch,
                id,
                OperationOutcome::failed(
                    format!(
                        "cannot create branch '{branch}' in '{}': base branch '{BASE_BRANCH}' not found",
                        repo.slug
                    ),
                    None,
                ),
            ),
        );
        return false;
    };

    let step = match client.create_branch(workspace, &repo.slug, branch, &target_hash) {
        Ok(resp) if resp.is_success() => StepOutcome::new(
            ResourceKind::Branch,
            id,
            OperationOutcome::created(format!("branch '{branch}' created in '{}'", repo.slug)),
        ),
        Ok(resp) if branch_already_exists(&resp) => {
            // Branch pre-existence is the expected, harmless outcome of
            // re-running a manifest; report it suppressed, never as an error.
            StepOutcome::new(
                ResourceKind::Branch,
                id,
                OperationOutcome::already_exists(format!(
                    "branch '{branch}' already exists in '{}'",
                    repo.slug
                )),
            )
            .suppressed()
        }
        Ok(resp) => {
            let message = match resp.error_message() {
                Some(m) => format!("failed to create branch '{branch}' in '{}': {m}", repo.slug),
                None => format!(
                    "failed to create branch '{branch}' in '{}' (HTTP {})",
                    repo.slug, resp.status
                ),
            };
            StepOutcome::new(
                ResourceKind::Branch,
                id,
                OperationOutcome::failed(message, Some(resp.body)),
            )
        }
        Err(err) => StepOutcome::new(
            ResourceKind::Branch,
            id,
            transport_failure(&format!("branch '{branch}'"), err),
        ),
    };

    let available = step.outcome.is_success();
    report.record(reporter, step);
    available
}

/// Read-after-write check on `main`, then apply the push restriction.
/// Protection against a not-yet-visible branch is rejected by the platform,
/// so a failed check skips the call and reports why.
fn protect_main(
    client: &dyn WorkspaceResourceClient,
    workspace: &str,
    repo: &RepositorySpec,
    reporter: &mut dyn Reporter,
    report: &mut RunReport,
) {
    let id = format!("{}/{BASE_BRANCH}", repo.slug);
    let base = BranchName::from(BASE_BRANCH);

    let visible = match client.read_branch(workspace, &repo.slug, &base) {
        Ok(resp) => resp.status == 200,
        Err(err) => {
            report.record(
                reporter,
                StepOutcome::new(
                    ResourceKind::BranchProtection,
                    id,
                    transport_failure(&format!("protection of '{BASE_BRANCH}'"), err),
                ),
            );
            return;
        }
    };
    if !visible {
        report.record(
            reporter,
            StepOutcome::new(
                ResourceKind::BranchProtection,
                id,
                OperationOutcome::failed(
                    format!(
                        "branch '{BASE_BRANCH}' not visible yet in '{}'; cannot apply protection",
                        repo.slug
                    ),
                    None,
                ),
            ),
        );
        return;
    }

    let outcome = match client.protect_branch(workspace, &repo.slug, &base) {
        Ok(resp) if resp.is_success() => OperationOutcome::created(format!(
            "branch '{BASE_BRANCH}' protected in '{}' (pull requests required)",
            repo.slug
        )),
        Ok(resp) if resp.status == 409 => OperationOutcome::already_exists(format!(
            "branch '{BASE_BRANCH}' already protected in '{}'",
            repo.slug
        )),
        Ok(resp) => OperationOutcome::failed(
            format!(
                "failed to protect '{BASE_BRANCH}' in '{}' (HTTP {})",
                repo.slug, resp.status
            ),
            Some(resp.body),
        ),
        Err(err) => transport_failure(&format!("protection of '{BASE_BRANCH}'"), err),
    };
    report.record(
        reporter,
        StepOutcome::new(ResourceKind::BranchProtection, id, outcome),
    );
}

/// Does a branch-create rejection mean "duplicate"?
fn branch_already_exists(resp: &RawResponse) -> bool {
    if let Some(message) = resp.error_message() {
        if message.contains(BRANCH_EXISTS_TOKEN) || message.to_lowercase().contains("already exists")
        {
            return true;
        }
    }
    resp.body
        .get("error")
        .and_then(|e| e.get("data"))
        .and_then(|d| d.get("key"))
        .and_then(serde_json::Value::as_str)
        == Some(BRANCH_EXISTS_TOKEN)
}

fn transport_failure(resource: &str, err: ClientError) -> OperationOutcome {
    OperationOutcome::failed(format!("transport failure for {resource}: {err}"), None)
}
