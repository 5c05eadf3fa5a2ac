//! The REST surface of the RideWithGPS API client.
//!
//! [`RwgpsClient`] is the type callers hold. It owns the configuration, the
//! transport, the optional response cache, and the mutable authentication
//! state, and exposes:
//!
//! - [`authenticate`](RwgpsClient::authenticate) /
//!   [`authenticate_legacy`](RwgpsClient::authenticate_legacy): login
//!   exchanges that store a token for subsequent requests
//! - [`get`](RwgpsClient::get), [`put`](RwgpsClient::put),
//!   [`post`](RwgpsClient::post), [`patch`](RwgpsClient::patch),
//!   [`delete`](RwgpsClient::delete): single typed calls returning a
//!   normalized [`serde_json::Value`]
//! - [`list`](RwgpsClient::list): a lazy, auto-paginating iterator over list
//!   endpoints, hiding which of the two pagination generations is in effect
//! - [`clear_cache`](RwgpsClient::clear_cache)
//!
//! # Example
//!
//! ```rust,ignore
//! use rwgps_api::{RwgpsClient, RwgpsConfig, ApiKey};
//!
//! let config = RwgpsConfig::builder()
//!     .api_key(ApiKey::new("my-api-key")?)
//!     .cache_enabled(true)
//!     .build()?;
//! let client = RwgpsClient::new(config);
//!
//! let user = client.authenticate("rider@example.com", "password")?;
//!
//! for trip in client.list("/api/v1/trips.json", None, Some(30), "trips") {
//!     let trip = trip?;
//!     println!("{}", trip["name"]);
//! }
//! ```

pub mod pagination;

pub use pagination::{Generation, ListIter};

use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use crate::auth::AuthState;
use crate::clients::cache::{cache_key, MemoryCache, ResponseCache};
use crate::clients::errors::ClientError;
use crate::clients::http_request::{compose, HttpMethod, Params};
use crate::clients::http_response::normalize;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::RwgpsConfig;

/// The login endpoint for the current API generation.
const AUTH_TOKENS_PATH: &str = "/api/v1/auth_tokens.json";

/// The login endpoint for the legacy API generation.
const CURRENT_USER_PATH: &str = "/users/current.json";

/// A client session for the RideWithGPS API.
///
/// Create one per process or logical session. All methods take `&self`; the
/// only mutable state is the auth token written by the login methods and read
/// by request composition, guarded by an `RwLock` so the client stays
/// `Send + Sync`.
pub struct RwgpsClient {
    config: RwgpsConfig,
    transport: Box<dyn Transport>,
    cache: Option<Box<dyn ResponseCache>>,
    auth: RwLock<Option<AuthState>>,
}

// Verify RwgpsClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RwgpsClient>();
};

impl std::fmt::Debug for RwgpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RwgpsClient")
            .field("config", &self.config)
            .field("authenticated", &self.auth_token().is_some())
            .finish_non_exhaustive()
    }
}

impl RwgpsClient {
    /// Creates a client with the default reqwest transport.
    ///
    /// An in-memory cache is attached when the configuration enables caching.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: RwgpsConfig) -> Self {
        let transport = ReqwestTransport::new(config.user_agent_prefix());
        Self::with_transport(config, transport)
    }

    /// Creates a client over a caller-provided transport.
    ///
    /// An in-memory cache is attached when the configuration enables caching.
    pub fn with_transport(config: RwgpsConfig, transport: impl Transport + 'static) -> Self {
        let cache: Option<Box<dyn ResponseCache>> = config
            .cache_enabled()
            .then(|| Box::new(MemoryCache::new()) as Box<dyn ResponseCache>);
        Self::with_parts(config, Box::new(transport), cache)
    }

    /// Creates a client from explicit parts, for full injection of the
    /// transport and cache collaborators.
    #[must_use]
    pub fn with_parts(
        config: RwgpsConfig,
        transport: Box<dyn Transport>,
        cache: Option<Box<dyn ResponseCache>>,
    ) -> Self {
        Self {
            config,
            transport,
            cache,
            auth: RwLock::new(None),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &RwgpsConfig {
        &self.config
    }

    /// Returns the stored auth token, if authenticated.
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.auth
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.auth_token.clone())
    }

    /// Returns the authenticated user record, if authenticated.
    #[must_use]
    pub fn user_info(&self) -> Option<Value> {
        self.auth
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.user.clone())
    }

    /// Logs in through the current-generation token endpoint and stores the
    /// returned token and user record for subsequent requests.
    ///
    /// Sends `POST /api/v1/auth_tokens.json` with the credentials as a JSON
    /// body and the API key in the `x-rwgps-api-key` header. On success the
    /// authenticated user record is returned. A response missing the expected
    /// fields stores nothing and returns `Ok(None)` — callers branch on the
    /// presence of the identity rather than catching an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the network call fails.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Value>, ClientError> {
        let mut params = Params::new();
        params.insert(
            "user".to_string(),
            serde_json::json!({ "email": email, "password": password }),
        );

        let response = self.post(AUTH_TOKENS_PATH, Some(&params))?;
        let token_record = response.get("auth_token");
        let token = token_record
            .and_then(|record| record.get("auth_token"))
            .and_then(Value::as_str);
        let user = token_record.and_then(|record| record.get("user"));

        Ok(self.store_auth(token, user))
    }

    /// Logs in through the legacy current-user endpoint.
    ///
    /// Sends `GET /users/current.json` with the credentials as query
    /// parameters and extracts the token from the returned user record. Same
    /// contract as [`authenticate`](Self::authenticate): a malformed response
    /// stores nothing and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the network call fails.
    pub fn authenticate_legacy(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Value>, ClientError> {
        let mut params = Params::new();
        params.insert("email".to_string(), Value::from(email));
        params.insert("password".to_string(), Value::from(password));

        let response = self.get(CURRENT_USER_PATH, Some(&params))?;
        let user = response.get("user");
        let token = user
            .and_then(|record| record.get("auth_token"))
            .and_then(Value::as_str);

        Ok(self.store_auth(token, user))
    }

    /// Stores auth state when both pieces are present; otherwise stores
    /// nothing. Returns the user record that was stored.
    fn store_auth(&self, token: Option<&str>, user: Option<&Value>) -> Option<Value> {
        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (token, user.clone()),
            _ => {
                tracing::warn!("login response missing auth token or user record");
                return None;
            }
        };

        // The state is a plain swap, so a poisoned lock is safe to recover;
        // skipping the store would report a session that attaches no token.
        let mut state = self.auth.write().unwrap_or_else(PoisonError::into_inner);
        *state = Some(AuthState::new(token.to_string(), user.clone()));
        drop(state);
        Some(user)
    }

    /// Makes a GET request and returns the normalized response value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the network call fails.
    pub fn get(&self, path: &str, params: Option<&Params>) -> Result<Value, ClientError> {
        self.call(HttpMethod::Get, path, params)
    }

    /// Makes a PUT request and returns the normalized response value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the network call fails.
    pub fn put(&self, path: &str, params: Option<&Params>) -> Result<Value, ClientError> {
        self.call(HttpMethod::Put, path, params)
    }

    /// Makes a POST request and returns the normalized response value.
    ///
    /// Non-control parameters are sent as the JSON body; see
    /// [`crate::clients::http_request`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the network call fails.
    pub fn post(&self, path: &str, params: Option<&Params>) -> Result<Value, ClientError> {
        self.call(HttpMethod::Post, path, params)
    }

    /// Makes a PATCH request and returns the normalized response value.
    ///
    /// Non-control parameters are sent as the JSON body; see
    /// [`crate::clients::http_request`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the network call fails.
    pub fn patch(&self, path: &str, params: Option<&Params>) -> Result<Value, ClientError> {
        self.call(HttpMethod::Patch, path, params)
    }

    /// Makes a DELETE request and returns the normalized response value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the network call fails.
    pub fn delete(&self, path: &str, params: Option<&Params>) -> Result<Value, ClientError> {
        self.call(HttpMethod::Delete, path, params)
    }

    /// Iterates a list endpoint lazily, auto-paginating across either
    /// pagination generation.
    ///
    /// The generation is resolved once from the path: paths under `/api/v1/`
    /// use page/page_size, everything else uses offset/limit. `result_key`
    /// names the response field holding the item array (e.g. `"trips"` for
    /// `/api/v1/trips.json`, `"results"` for legacy search endpoints).
    ///
    /// At most `limit` items are yielded when a limit is given;
    /// `Some(0)` yields nothing and issues no requests. Each call creates a
    /// fresh cursor, and dropping the iterator issues no further requests.
    #[must_use]
    pub fn list<'a>(
        &'a self,
        path: &str,
        params: Option<&Params>,
        limit: Option<u64>,
        result_key: &str,
    ) -> ListIter<'a> {
        ListIter::new(
            self,
            path.to_string(),
            params.cloned().unwrap_or_default(),
            limit,
            result_key.to_string(),
        )
    }

    /// Empties the response cache. A no-op when caching is disabled.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Composes and sends a single request, consulting the cache when
    /// enabled, and normalizes the response body.
    fn call(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Params>,
    ) -> Result<Value, ClientError> {
        let empty = Params::new();
        let params = params.unwrap_or(&empty);
        let token = self.auth_token();

        let request = compose(
            method,
            self.config.base_url().as_ref(),
            path,
            params,
            self.config.api_key().as_ref(),
            self.config.version(),
            token.as_deref(),
        );

        if let Some(cache) = &self.cache {
            if let Some(bytes) = cache.get(&cache_key(&request)) {
                tracing::debug!(%method, url = %request.url, "cache hit");
                return Ok(normalize(&bytes));
            }
        }

        tracing::debug!(%method, url = %request.url, "sending request");
        let raw = self.transport.send(
            request.method,
            &request.url,
            &request.headers,
            request.body.as_deref(),
        )?;

        if raw.is_ok() {
            if let Some(cache) = &self.cache {
                cache.put(&cache_key(&request), &raw.body);
            }
        } else {
            tracing::warn!(status = raw.status, path, "non-success response");
        }

        Ok(normalize(&raw.body))
    }
}
