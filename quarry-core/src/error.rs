//! Error types for quarry-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from manifest loading and validation.
///
/// Every variant is fatal for the whole run: a manifest is all-or-nothing to
/// parse, even though it is not all-or-nothing to execute.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error reading manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A project entry is missing a required field (`key` or `name`).
    #[error("project #{index} is missing required field '{field}'")]
    MissingProjectField { index: usize, field: &'static str },

    /// A repository entry is missing its required `slug`.
    #[error("repository #{index} in project '{project}' has an empty slug")]
    MissingRepoSlug { project: String, index: usize },

    /// The same project key appears twice in one manifest.
    #[error("duplicate project key '{key}'")]
    DuplicateProjectKey { key: String },

    /// The same repository slug appears twice within one project.
    #[error("duplicate repository slug '{slug}' in project '{project}'")]
    DuplicateRepoSlug { project: String, slug: String },
}
