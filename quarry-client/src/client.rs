//! The workspace resource client contract.
//!
//! One remote operation per call, no orchestration logic. Implementations are
//! addressable by workspace identifier, project key, and repository slug; the
//! orchestrators own sequencing and interpretation of the results.

use quarry_core::types::{BranchName, ProjectKey, RepoSlug};

use crate::error::ClientError;
use crate::response::RawResponse;

/// Remote operations on workspace resources, one HTTP call each.
///
/// Every method blocks until the platform answers (or the transport fails)
/// and returns the raw status + payload; HTTP-level failures are data for the
/// classifier, transport-level failures are [`ClientError`].
pub trait WorkspaceResourceClient {
    fn create_project(
        &self,
        workspace: &str,
        key: &ProjectKey,
        name: &str,
        description: &str,
    ) -> Result<RawResponse, ClientError>;

    fn delete_project(&self, workspace: &str, key: &ProjectKey)
        -> Result<RawResponse, ClientError>;

    fn create_repository(
        &self,
        workspace: &str,
        key: &ProjectKey,
        slug: &RepoSlug,
        is_private: bool,
    ) -> Result<RawResponse, ClientError>;

    fn delete_repository(
        &self,
        workspace: &str,
        slug: &RepoSlug,
    ) -> Result<RawResponse, ClientError>;

    fn list_repositories(
        &self,
        workspace: &str,
        key: &ProjectKey,
    ) -> Result<RawResponse, ClientError>;

    /// Read a branch by name. A 200 body carries `target.hash`, the latest
    /// commit reference — required both to cut new branches and as the
    /// read-after-write visibility check before protection.
    fn read_branch(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
    ) -> Result<RawResponse, ClientError>;

    /// Create a branch pointing at `target_hash`.
    fn create_branch(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
        target_hash: &str,
    ) -> Result<RawResponse, ClientError>;

    /// Push an initial commit to `branch`, materializing the default branch
    /// of an empty repository. How the commit is produced (content API,
    /// local checkout) is an implementation detail.
    fn push_initial_commit(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
    ) -> Result<RawResponse, ClientError>;

    /// Apply a push-restriction rule to `branch` so changes must arrive via
    /// pull request.
    fn protect_branch(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
    ) -> Result<RawResponse, ClientError>;
}
