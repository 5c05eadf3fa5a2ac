//! Request-time error types for the RideWithGPS API client.
//!
//! This module contains the error types surfaced by client operations.
//!
//! # Error Handling
//!
//! The client distinguishes failure classes by type, not by string matching:
//!
//! - [`TransportError`]: network/connection failure from the transport layer,
//!   surfaced to the caller unmodified and never retried by the core
//! - [`ClientError`]: unified error type returned by client operations
//!
//! Response-format problems (empty bodies, non-JSON bodies, missing result
//! keys) are deliberately *not* errors: they degrade into valid, if sparse,
//! response values. A failed login likewise surfaces as an absent identity
//! rather than an error. See [`crate::clients::http_response`] and
//! [`crate::rest::RwgpsClient::authenticate`].
//!
//! # Example
//!
//! ```rust,ignore
//! match client.get("/trips/1.json", None) {
//!     Ok(value) => println!("trip: {value}"),
//!     Err(ClientError::Transport(e)) => eprintln!("network failure: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the transport layer fails to complete a request.
///
/// This covers DNS, connection, TLS, and timeout failures. The core never
/// retries a transport error; retry policy belongs to the caller.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    /// Human-readable description of the failure.
    pub message: String,
    /// The underlying error, when one exists.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error from a bare message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Unified error type for client operations.
///
/// Only genuine failures appear here. Malformed response bodies are recovered
/// by response normalization and never reach this type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or connection error from the transport layer.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_message() {
        let error = TransportError::new("connection refused");
        assert_eq!(error.to_string(), "transport error: connection refused");
    }

    #[test]
    fn test_transport_error_preserves_source() {
        let inner: Box<dyn std::error::Error + Send + Sync> =
            "dns failure".to_string().into();
        let error = TransportError {
            message: "lookup failed".to_string(),
            source: Some(inner),
        };
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_client_error_wraps_transport() {
        let error = ClientError::from(TransportError::new("timed out"));
        assert!(matches!(error, ClientError::Transport(_)));
        assert!(error.to_string().contains("timed out"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let transport: &dyn std::error::Error = &TransportError::new("x");
        let _ = transport;

        let client: &dyn std::error::Error = &ClientError::Transport(TransportError::new("x"));
        let _ = client;
    }
}
