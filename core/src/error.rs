//! Error types for the accounts API client.
//!
//! # Design
//! A non-matching HTTP status is not an error: it comes back as a
//! `ClientResponse` with `success: false`. Errors cover only calls that
//! could not be built, could not complete, or completed with a body that
//! does not decode.

use thiserror::Error;

/// Errors returned by `AccountClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured root URL is unusable. Fatal; retrying cannot help.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// Method, URL or id could not form a request.
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body is not a valid `{"data": Account}` envelope.
    #[error("deserialization failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for the deadline and cancellation transport failures.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(TransportError::Cancelled | TransportError::DeadlineExceeded)
        )
    }
}

/// Failures raised while a request is in flight.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("context canceled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// Connection, TLS or protocol failure reported by the transport.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read to completion.
    #[error("failed to read response body: {0}")]
    Body(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
