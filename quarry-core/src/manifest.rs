//! Manifest loading and validation.
//!
//! A manifest is a single YAML document:
//!
//! ```yaml
//! projects:
//!   - key: TEST
//!     name: Test Project
//!     description: optional
//!     repositories:
//!       - slug: api
//!         is_private: true
//!         branches: main;dev        # or [main, dev]
//! ```
//!
//! Loading is all-or-nothing: any parse or validation failure aborts before a
//! single remote call is made. Execution order follows document order.

use std::collections::HashSet;
use std::path::Path;

use crate::error::ManifestError;
use crate::types::Manifest;

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load and validate a manifest from a YAML file.
///
/// Returns `ManifestError::Parse` (with path + line context) for malformed
/// YAML, or the first validation error encountered in document order.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let manifest: Manifest =
        serde_yaml::from_str(&contents).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
    validate(&manifest)?;
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Validate
// ---------------------------------------------------------------------------

/// Check structural invariants: non-empty `key`/`name`/`slug`, project keys
/// unique across the manifest, repository slugs unique within their project.
pub fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    let mut seen_keys = HashSet::new();
    for (index, project) in manifest.projects.iter().enumerate() {
        if project.key.0.trim().is_empty() {
            return Err(ManifestError::MissingProjectField { index, field: "key" });
        }
        if project.name.trim().is_empty() {
            return Err(ManifestError::MissingProjectField {
                index,
                field: "name",
            });
        }
        if !seen_keys.insert(project.key.0.clone()) {
            return Err(ManifestError::DuplicateProjectKey {
                key: project.key.0.clone(),
            });
        }

        let mut seen_slugs = HashSet::new();
        for (repo_index, repo) in project.repositories.iter().enumerate() {
            if repo.slug.0.trim().is_empty() {
                return Err(ManifestError::MissingRepoSlug {
                    project: project.key.0.clone(),
                    index: repo_index,
                });
            }
            if !seen_slugs.insert(repo.slug.0.clone()) {
                return Err(ManifestError::DuplicateRepoSlug {
                    project: project.key.0.clone(),
                    slug: repo.slug.0.clone(),
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProjectKey, ProjectSpec, RepoSlug, RepositorySpec};

    fn project(key: &str, repos: Vec<RepositorySpec>) -> ProjectSpec {
        ProjectSpec {
            key: ProjectKey::from(key),
            name: format!("{key} project"),
            description: String::new(),
            repositories: repos,
        }
    }

    fn repo(slug: &str) -> RepositorySpec {
        RepositorySpec {
            slug: RepoSlug::from(slug),
            is_private: true,
            branches: vec![],
        }
    }

    #[test]
    fn validate_accepts_empty_manifest() {
        validate(&Manifest::default()).expect("empty manifest is valid");
    }

    #[test]
    fn validate_rejects_duplicate_project_keys() {
        let manifest = Manifest {
            projects: vec![project("A", vec![]), project("A", vec![])],
        };
        let err = validate(&manifest).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateProjectKey { .. }), "got: {err}");
    }

    #[test]
    fn validate_rejects_duplicate_repo_slugs_within_project() {
        let manifest = Manifest {
            projects: vec![project("A", vec![repo("x"), repo("x")])],
        };
        let err = validate(&manifest).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateRepoSlug { .. }), "got: {err}");
    }

    #[test]
    fn validate_allows_same_slug_across_projects() {
        let manifest = Manifest {
            projects: vec![project("A", vec![repo("x")]), project("B", vec![repo("x")])],
        };
        validate(&manifest).expect("slugs are scoped per project");
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut p = project("A", vec![]);
        p.name = "   ".to_owned();
        let err = validate(&Manifest { projects: vec![p] }).unwrap_err();
        assert!(
            matches!(err, ManifestError::MissingProjectField { field: "name", .. }),
            "got: {err}"
        );
    }
}
