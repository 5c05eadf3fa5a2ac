//! # RideWithGPS API Client
//!
//! A Rust client for the RideWithGPS REST API, providing authentication,
//! typed CRUD requests, and transparent pagination across the API's two
//! endpoint generations.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`RwgpsConfig`] and [`RwgpsConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - A login exchange that stores an auth token and auto-attaches it to
//!   subsequent requests
//! - Request composition that places parameters correctly between the query
//!   string and the JSON body depending on HTTP method
//! - Total response normalization: empty and non-JSON bodies degrade into
//!   valid structured values instead of errors
//! - Lazy auto-pagination over both the current (`page`/`page_size`) and
//!   legacy (`offset`/`limit`) list protocols via [`RwgpsClient::list`]
//! - An optional response cache keyed on the composed request
//! - A [`Transport`] seam so the network layer can be substituted in tests
//!
//! ## Quick Start
//!
//! ```rust
//! use rwgps_api::{RwgpsConfig, ApiKey};
//!
//! let config = RwgpsConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .cache_enabled(true)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use rwgps_api::{RwgpsClient, RwgpsConfig, ApiKey};
//!
//! let config = RwgpsConfig::builder()
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .build()?;
//! let client = RwgpsClient::new(config);
//!
//! // Authenticate; the returned token rides along on every later request.
//! let user = client
//!     .authenticate("rider@example.com", "password")?
//!     .expect("bad credentials");
//! println!("hello, {}", user["display_name"]);
//!
//! // Single calls return schemaless values; absent fields read as None.
//! let trip = client.get("/trips/123.json", None)?;
//! println!("{:?}", trip["trip"]["name"].as_str());
//!
//! // List endpoints paginate lazily, across either API generation.
//! for trip in client.list("/api/v1/trips.json", None, Some(30), "trips") {
//!     println!("{}", trip?["name"]);
//! }
//! let user_id = user["id"].clone();
//! for gear in client.list(&format!("/users/{user_id}/gear.json"), None, None, "results") {
//!     println!("{}", gear?["nickname"]);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: newtypes and the config builder validate on
//!   construction
//! - **Synchronous, pull-based**: one blocking request at a time, issued only
//!   when the consumer asks for more items
//! - **Graceful degradation**: response-format quirks become sparse data, not
//!   errors; only transport failures surface as `Err`

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::AuthState;
pub use config::{ApiKey, BaseUrl, RwgpsConfig, RwgpsConfigBuilder};
pub use error::ConfigError;
pub use rest::{Generation, ListIter, RwgpsClient};

// Re-export HTTP plumbing types
pub use clients::{
    ApiRequest, ClientError, HttpMethod, MemoryCache, Params, RawResponse, ReqwestTransport,
    ResponseCache, Transport, TransportError,
};
