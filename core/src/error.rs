//! Error types for the Quorum API client.
//!
//! # Design
//! HTTP statuses are never errors here: a 401 or 500 from the server comes
//! back as an ordinary `HttpResponse`. `ApiError` covers what happens outside
//! that contract: rejected credentials, failures below HTTP, and JSON
//! encoding problems.

use thiserror::Error;

use crate::credentials::CredentialField;

/// Failure of the underlying transport before an HTTP response was received,
/// e.g. connection refused, DNS failure or timeout.
///
/// The transport's own error is kept as `source`, so callers can downcast it
/// (to `ureq::Error` for `UreqTransport`) to tell those cases apart.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap the transport's native error, keeping its message and type.
    pub fn from_source<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

/// Errors returned by `QuorumClient` and its helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A credential was empty or malformed after sanitization.
    #[error("Quorum API client credentials are invalid: bad {0}")]
    CredentialsInvalid(CredentialField),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A response body could not be deserialized into the requested type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A required configuration variable is not set.
    #[error("missing configuration variable {0}")]
    MissingConfig(&'static str),
}
