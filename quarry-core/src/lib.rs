//! Quarry core library — manifest model, loading, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`ManifestError`]
//! - [`manifest`] — load / validate

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ManifestError;
pub use types::{BranchName, Manifest, ProjectKey, ProjectSpec, RepoSlug, RepositorySpec};
