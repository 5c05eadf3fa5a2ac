//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;

/// A validated RideWithGPS API key.
///
/// This newtype ensures the API key is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use rwgps_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated API base URL.
///
/// The URL must carry an `http://` or `https://` scheme. A trailing slash is
/// stripped so paths can always be appended as `{base}{path}` with the path's
/// leading slash.
///
/// # Example
///
/// ```rust
/// use rwgps_api::BaseUrl;
///
/// let url = BaseUrl::new("https://ridewithgps.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://ridewithgps.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The production RideWithGPS API host.
    pub const RIDEWITHGPS: &'static str = "https://ridewithgps.com";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not start with
    /// `http://` or `https://`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ConfigError::InvalidBaseUrl { url });
        }
        Ok(Self(url.trim_end_matches('/').to_string()))
    }

    /// Returns the default production base URL.
    #[must_use]
    pub fn ridewithgps() -> Self {
        Self(Self::RIDEWITHGPS.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::ridewithgps()
    }
}
