//! Shared run entrypoint used by the CLI (and any other embedder).

use quarry_core::types::Manifest;
use quarry_client::WorkspaceResourceClient;

use crate::classify::ClassifierConfig;
use crate::outcome::{Reporter, RunReport};
use crate::{provision, teardown};

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Create everything the manifest declares.
    Provision,
    /// Delete everything the manifest declares.
    Teardown,
}

/// Run a full manifest pass in the given mode.
///
/// This is the canonical entrypoint for `quarry apply` and `quarry destroy`.
/// It never fails: per-resource failures are data in the returned report.
pub fn run(
    client: &dyn WorkspaceResourceClient,
    workspace: &str,
    manifest: &Manifest,
    mode: RunMode,
    config: &ClassifierConfig,
    reporter: &mut dyn Reporter,
) -> RunReport {
    match mode {
        RunMode::Provision => provision::provision(client, workspace, manifest, config, reporter),
        RunMode::Teardown => teardown::teardown(client, workspace, manifest, reporter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::SilentReporter;
    use quarry_client::{ClientError, RawResponse};
    use quarry_core::types::{BranchName, ProjectKey, RepoSlug};

    /// A client that answers every call with 404 and records nothing.
    struct NotFoundClient;

    impl WorkspaceResourceClient for NotFoundClient {
        fn create_project(
            &self,
            _: &str,
            _: &ProjectKey,
            _: &str,
            _: &str,
        ) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn delete_project(&self, _: &str, _: &ProjectKey) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn create_repository(
            &self,
            _: &str,
            _: &ProjectKey,
            _: &RepoSlug,
            _: bool,
        ) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn delete_repository(&self, _: &str, _: &RepoSlug) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn list_repositories(&self, _: &str, _: &ProjectKey) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn read_branch(
            &self,
            _: &str,
            _: &RepoSlug,
            _: &BranchName,
        ) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn create_branch(
            &self,
            _: &str,
            _: &RepoSlug,
            _: &BranchName,
            _: &str,
        ) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn push_initial_commit(
            &self,
            _: &str,
            _: &RepoSlug,
            _: &BranchName,
        ) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
        fn protect_branch(
            &self,
            _: &str,
            _: &RepoSlug,
            _: &BranchName,
        ) -> Result<RawResponse, ClientError> {
            Ok(RawResponse::empty(404))
        }
    }

    #[test]
    fn run_empty_manifest_produces_empty_report() {
        let manifest = Manifest::default();
        let mut reporter = SilentReporter;
        let report = run(
            &NotFoundClient,
            "ws",
            &manifest,
            RunMode::Provision,
            &ClassifierConfig::default(),
            &mut reporter,
        );
        assert!(report.steps.is_empty());

        let report = run(
            &NotFoundClient,
            "ws",
            &manifest,
            RunMode::Teardown,
            &ClassifierConfig::default(),
            &mut reporter,
        );
        assert!(report.steps.is_empty());
    }
}
