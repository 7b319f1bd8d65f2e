//! # quarry-client
//!
//! The workspace resource client: one remote operation per call against the
//! hosting platform, no orchestration logic.
//!
//! - [`client`] — the [`WorkspaceResourceClient`] contract
//! - [`bitbucket`] — blocking Bitbucket Cloud implementation
//! - [`response`] — [`RawResponse`], the classifier's input
//! - [`error`] — [`ClientError`]

pub mod bitbucket;
pub mod client;
pub mod error;
pub mod response;

pub use bitbucket::{BitbucketClient, Credentials, DEFAULT_BASE_URL};
pub use client::WorkspaceResourceClient;
pub use error::ClientError;
pub use response::RawResponse;
