//! Error types for the DNS Made Easy client.
//!
//! Two kinds of failure are reported through `Err`:
//! - [`DnsMadeEasyError::MissingArgument`]: a required argument was empty,
//!   detected before any request is sent.
//! - [`DnsMadeEasyError::Request`]: the request could not be completed at the
//!   HTTP layer (network, timeout, signing, decoding). The underlying
//!   [`TransportError`] is available through [`std::error::Error::source`].
//!
//! A request that reached the API and came back with a non-success status is
//! *not* an error; see [`ApiOutcome`](crate::ApiOutcome).

use serde::Serialize;
use thiserror::Error;

/// Failure of the transport layer (everything below the API semantics).
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "detail")]
pub enum TransportError {
    /// Connection refused, DNS resolution failure, broken body stream, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The authentication headers could not be built.
    #[error("Signature error: {0}")]
    Signature(String),

    /// The request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured endpoint is not a usable base URL.
    #[error("Invalid endpoint '{endpoint}': {detail}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Why it was rejected.
        detail: String,
    },
}

/// Errors returned by the client.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum DnsMadeEasyError {
    /// A required argument was missing or empty. No request was sent.
    #[error("The {0} is required.")]
    MissingArgument(&'static str),

    /// The request could not be completed at the HTTP layer.
    #[error("{operation}")]
    Request {
        /// Operation-specific description, e.g. `Unable to add domain: example.com.`
        operation: String,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },
}

impl DnsMadeEasyError {
    pub(crate) fn request(operation: impl Into<String>, source: TransportError) -> Self {
        Self::Request {
            operation: operation.into(),
            source,
        }
    }

    /// Returns the transport failure behind a [`Request`](Self::Request) error.
    #[must_use]
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Request { source, .. } => Some(source),
            Self::MissingArgument(_) => None,
        }
    }
}

/// Convenience type alias for `Result<T, DnsMadeEasyError>`.
pub type Result<T> = std::result::Result<T, DnsMadeEasyError>;

/// Fails with [`DnsMadeEasyError::MissingArgument`] when `value` is empty.
pub(crate) fn require(value: &str, argument: &'static str) -> Result<()> {
    if value.is_empty() {
        log::warn!("Rejected call: {argument} is required");
        return Err(DnsMadeEasyError::MissingArgument(argument));
    }
    Ok(())
}
