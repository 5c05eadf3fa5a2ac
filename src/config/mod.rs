//! Configuration types for the RideWithGPS API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for API communication with RideWithGPS.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`RwgpsConfig`]: The main configuration struct holding all client settings
//! - [`RwgpsConfigBuilder`]: A builder for constructing [`RwgpsConfig`] instances
//! - [`ApiKey`]: A validated API key newtype
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use rwgps_api::{RwgpsConfig, ApiKey};
//!
//! let config = RwgpsConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .cache_enabled(true)
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use crate::error::ConfigError;

/// The protocol version sent with every request when the caller does not
/// override it.
pub const DEFAULT_API_VERSION: u32 = 2;

/// Configuration for the RideWithGPS API client.
///
/// This struct holds all configuration needed for client operations: the API
/// key, the base URL, the protocol version, and the response-cache toggle.
///
/// # Thread Safety
///
/// `RwgpsConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads.
///
/// # Example
///
/// ```rust
/// use rwgps_api::{RwgpsConfig, ApiKey};
///
/// let config = RwgpsConfig::builder()
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.version(), 2);
/// assert!(!config.cache_enabled());
/// ```
#[derive(Clone, Debug)]
pub struct RwgpsConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    version: u32,
    cache_enabled: bool,
    user_agent_prefix: Option<String>,
}

impl RwgpsConfig {
    /// Creates a new builder for constructing a `RwgpsConfig`.
    #[must_use]
    pub fn builder() -> RwgpsConfigBuilder {
        RwgpsConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the protocol version attached to outgoing requests.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns whether response caching is enabled.
    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify RwgpsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RwgpsConfig>();
};

/// Builder for constructing [`RwgpsConfig`] instances.
///
/// The only required field is `api_key`. All other fields have defaults.
///
/// # Defaults
///
/// - `base_url`: `https://ridewithgps.com`
/// - `version`: 2
/// - `cache_enabled`: `false`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use rwgps_api::{RwgpsConfig, ApiKey, BaseUrl};
///
/// let config = RwgpsConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .base_url(BaseUrl::new("https://staging.ridewithgps.com").unwrap())
///     .version(2)
///     .cache_enabled(true)
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct RwgpsConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    version: Option<u32>,
    cache_enabled: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl RwgpsConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the protocol version.
    #[must_use]
    pub const fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Enables or disables the response cache.
    #[must_use]
    pub const fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`RwgpsConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<RwgpsConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(RwgpsConfig {
            api_key,
            base_url: self.base_url.unwrap_or_default(),
            version: self.version.unwrap_or(DEFAULT_API_VERSION),
            cache_enabled: self.cache_enabled.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = RwgpsConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = RwgpsConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://ridewithgps.com");
        assert_eq!(config.version(), DEFAULT_API_VERSION);
        assert!(!config.cache_enabled());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RwgpsConfig>();
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = RwgpsConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.api_key(), config.api_key());

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("RwgpsConfig"));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = RwgpsConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .base_url(BaseUrl::new("http://localhost:8080").unwrap())
            .version(3)
            .cache_enabled(true)
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:8080");
        assert_eq!(config.version(), 3);
        assert!(config.cache_enabled());
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }
}
