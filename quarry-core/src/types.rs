//! Domain types for the Quarry manifest.
//!
//! The manifest is the declarative description of the desired workspace state:
//! projects, repositories within them, and branches within those. All types
//! are serializable/deserializable via serde + serde_yaml, and all sequences
//! preserve document order — the orchestrators process them in exactly the
//! order they were written.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed project key (unique identifier within a workspace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectKey(pub String);

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed repository slug (unique within its project).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoSlug(pub String);

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed branch name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(pub String);

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BranchName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BranchName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Branch list normalization
// ---------------------------------------------------------------------------

/// Accepts either a `;`-delimited string (`"main;dev"`) or a YAML list
/// (`[main, dev]`) and normalizes to an ordered list of trimmed, non-empty
/// branch names.
#[derive(Deserialize)]
#[serde(untagged)]
enum BranchField {
    Delimited(String),
    List(Vec<String>),
}

fn deserialize_branches<'de, D>(deserializer: D) -> Result<Vec<BranchName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let field = Option::<BranchField>::deserialize(deserializer)?;
    let raw: Vec<String> = match field {
        None => return Ok(vec![]),
        Some(BranchField::Delimited(s)) => s.split(';').map(str::to_owned).collect(),
        Some(BranchField::List(items)) => items,
    };
    Ok(raw
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(BranchName::from)
        .collect())
}

fn default_private() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A repository to provision inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySpec {
    pub slug: RepoSlug,
    /// Repository visibility. The platform default for new repos is private.
    #[serde(default = "default_private")]
    pub is_private: bool,
    /// Branches to create, in declaration order, all cut from `main`.
    #[serde(default, deserialize_with = "deserialize_branches")]
    pub branches: Vec<BranchName>,
}

/// A project and its repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub key: ProjectKey,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repositories: Vec<RepositorySpec>,
}

/// Root of a Quarry manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub projects: Vec<ProjectSpec>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
