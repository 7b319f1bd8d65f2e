//! Error types for quarry-client.

use thiserror::Error;

/// Errors a client method can surface to callers.
///
/// HTTP error statuses are NOT errors at this layer — the platform answers
/// 4xx for interesting, classifiable reasons (conflict, already-exists,
/// not-found), so those come back as a [`crate::RawResponse`]. Only failures
/// to reach the platform at all land here.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: DNS, TLS, refused connection, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform answered but the body could not be read off the socket.
    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
}

impl From<ureq::Transport> for ClientError {
    fn from(err: ureq::Transport) -> Self {
        ClientError::Transport(err.to_string())
    }
}
