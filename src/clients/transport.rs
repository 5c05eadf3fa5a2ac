//! The transport seam between the client core and the network.
//!
//! The core never speaks TLS, DNS, or connection pooling directly. It
//! depends on the [`Transport`] trait: given a fully composed request, return
//! the raw status and body bytes, or fail with a [`TransportError`].
//!
//! [`ReqwestTransport`] is the default implementation, backed by
//! `reqwest::blocking`. Tests substitute scripted transports to exercise the
//! core without a network.

use std::collections::HashMap;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;

/// Client version from Cargo.toml, reported in the User-Agent header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A raw response from the transport layer: status code and body bytes,
/// before any normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The unparsed response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }
}

/// Performs a single blocking HTTP exchange.
///
/// Implementations own all socket-level concerns (pooling, TLS, timeouts).
/// The core calls `send` once per request and surfaces any error unmodified;
/// retry policy is a caller concern.
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw status and body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on any network-level failure. An HTTP error
    /// status is *not* a transport error; it is returned as a [`RawResponse`].
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&[u8]>,
    ) -> Result<RawResponse, TransportError>;
}

/// The default [`Transport`] implementation, backed by a blocking reqwest
/// client with rustls TLS.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a new transport.
    ///
    /// # Arguments
    ///
    /// * `user_agent_prefix` - Optional application prefix prepended to the
    ///   library User-Agent string
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(user_agent_prefix: Option<&str>) -> Self {
        let prefix = user_agent_prefix.map_or(String::new(), |p| format!("{p} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{prefix}RideWithGPS API Library v{CLIENT_VERSION} | Rust {rust_version}");

        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&[u8]>,
    ) -> Result<RawResponse, TransportError> {
        let mut builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        if let Some(bytes) = body {
            builder = builder.body(bytes.to_vec());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        Ok(RawResponse { status, body })
    }
}
