//! HTTP plumbing for the RideWithGPS API client.
//!
//! This module contains the pieces the REST surface is built from:
//!
//! - [`http_request`]: request composition (URL, query string, body split)
//! - [`http_response`]: response normalization and pagination metadata
//! - [`transport`]: the network seam ([`Transport`]) and its reqwest-backed
//!   default implementation
//! - [`cache`]: the optional response cache
//! - [`errors`]: transport and client error types

pub mod cache;
pub mod errors;
pub mod http_request;
pub mod http_response;
pub mod transport;

pub use cache::{MemoryCache, ResponseCache};
pub use errors::{ClientError, TransportError};
pub use http_request::{ApiRequest, HttpMethod, Params};
pub use http_response::{normalize, PageMeta};
pub use transport::{RawResponse, ReqwestTransport, Transport};
