//! Bitbucket Cloud 2.0 REST implementation of [`WorkspaceResourceClient`].
//!
//! Endpoint map:
//!
//! ```text
//! POST   /workspaces/{ws}/projects                       create project
//! DELETE /workspaces/{ws}/projects/{key}                 delete project
//! POST   /repositories/{ws}/{slug}                       create repository
//! DELETE /repositories/{ws}/{slug}                       delete repository
//! GET    /repositories/{ws}?q=project.key="{key}"        list repositories
//! GET    /repositories/{ws}/{slug}/refs/branches/{name}  read branch
//! POST   /repositories/{ws}/{slug}/refs/branches         create branch
//! POST   /repositories/{ws}/{slug}/src                   initial commit
//! POST   /repositories/{ws}/{slug}/branch-restrictions   protect branch
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

use quarry_core::types::{BranchName, ProjectKey, RepoSlug};

use crate::client::WorkspaceResourceClient;
use crate::error::ClientError;
use crate::response::RawResponse;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Seed file committed into empty repositories so the default branch exists.
/// Branches cannot be cut until the repository has at least one commit.
const SEED_FILE: &str = "DELETEME";
const SEED_CONTENT: &str = "Temporary file for branch creation";

/// HTTP Basic credentials: username + app password.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub app_password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            app_password: app_password.into(),
        }
    }

    fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.app_password);
        format!("Basic {}", BASE64.encode(raw))
    }
}

/// Blocking Bitbucket client.
pub struct BitbucketClient {
    agent: ureq::Agent,
    base_url: String,
    auth_header: String,
}

impl BitbucketClient {
    pub fn new(credentials: &Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Point the client at an alternate API root (test servers).
    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: credentials.header_value(),
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("{method} {url}");
        self.agent
            .request(method, &url)
            .set("Authorization", &self.auth_header)
    }

    /// Flatten the ureq result: HTTP error statuses become a [`RawResponse`]
    /// for the classifier, only transport failures stay errors.
    fn into_raw(result: Result<ureq::Response, ureq::Error>) -> Result<RawResponse, ClientError> {
        let response = match result {
            Ok(r) => r,
            Err(ureq::Error::Status(_, r)) => r,
            Err(ureq::Error::Transport(t)) => return Err(t.into()),
        };
        let status = response.status();
        let text = response.into_string()?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            // Non-JSON bodies (HTML error pages) are kept verbatim as a string.
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(RawResponse::new(status, body))
    }
}

impl WorkspaceResourceClient for BitbucketClient {
    fn create_project(
        &self,
        workspace: &str,
        key: &ProjectKey,
        name: &str,
        description: &str,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request("POST", &format!("/workspaces/{workspace}/projects"))
            .send_json(json!({
                "key": key.0,
                "name": name,
                "description": description,
            }));
        Self::into_raw(result)
    }

    fn delete_project(
        &self,
        workspace: &str,
        key: &ProjectKey,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request("DELETE", &format!("/workspaces/{workspace}/projects/{key}"))
            .call();
        Self::into_raw(result)
    }

    fn create_repository(
        &self,
        workspace: &str,
        key: &ProjectKey,
        slug: &RepoSlug,
        is_private: bool,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request("POST", &format!("/repositories/{workspace}/{slug}"))
            .send_json(json!({
                "scm": "git",
                "project": { "key": key.0 },
                "is_private": is_private,
            }));
        Self::into_raw(result)
    }

    fn delete_repository(
        &self,
        workspace: &str,
        slug: &RepoSlug,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request("DELETE", &format!("/repositories/{workspace}/{slug}"))
            .call();
        Self::into_raw(result)
    }

    fn list_repositories(
        &self,
        workspace: &str,
        key: &ProjectKey,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request("GET", &format!("/repositories/{workspace}"))
            .query("q", &format!("project.key=\"{key}\""))
            .call();
        Self::into_raw(result)
    }

    fn read_branch(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request(
                "GET",
                &format!("/repositories/{workspace}/{slug}/refs/branches/{branch}"),
            )
            .call();
        Self::into_raw(result)
    }

    fn create_branch(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
        target_hash: &str,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request(
                "POST",
                &format!("/repositories/{workspace}/{slug}/refs/branches"),
            )
            .send_json(json!({
                "name": branch.0,
                "target": { "hash": target_hash },
            }));
        Self::into_raw(result)
    }

    fn push_initial_commit(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
    ) -> Result<RawResponse, ClientError> {
        // The src endpoint treats unknown form keys as file paths; one call
        // commits the seed file and materializes the branch.
        let message = format!("Initial commit with {SEED_FILE}");
        let result = self
            .request("POST", &format!("/repositories/{workspace}/{slug}/src"))
            .send_form(&[
                ("branch", branch.0.as_str()),
                ("message", message.as_str()),
                (SEED_FILE, SEED_CONTENT),
            ]);
        Self::into_raw(result)
    }

    fn protect_branch(
        &self,
        workspace: &str,
        slug: &RepoSlug,
        branch: &BranchName,
    ) -> Result<RawResponse, ClientError> {
        let result = self
            .request(
                "POST",
                &format!("/repositories/{workspace}/{slug}/branch-restrictions"),
            )
            .send_json(json!({
                "kind": "push",
                "pattern": branch.0,
                "users": [],
                "groups": [],
                "value": null,
            }));
        Self::into_raw(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_render_basic_auth() {
        let creds = Credentials::new("user", "secret");
        // "user:secret" in base64
        assert_eq!(creds.header_value(), "Basic dXNlcjpzZWNyZXQ=");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let creds = Credentials::new("u", "p");
        let client = BitbucketClient::with_base_url(&creds, "http://localhost:7990/");
        assert_eq!(client.base_url, "http://localhost:7990");
    }
}
