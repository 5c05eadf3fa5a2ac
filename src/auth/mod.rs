//! Authentication state for the RideWithGPS API client.
//!
//! A successful login yields an opaque auth token and the authenticated
//! user record. The client stores them as an [`AuthState`] and auto-attaches
//! the token to every subsequent request (unless the caller supplies their
//! own `auth_token` parameter).
//!
//! The login exchange itself lives on the client; see
//! [`crate::rest::RwgpsClient::authenticate`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Credentials and identity captured by a successful login.
///
/// Serializable so applications can persist a session between runs instead of
/// re-authenticating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// The opaque auth token attached to subsequent requests.
    pub auth_token: String,
    /// The authenticated user record, as returned by the API.
    pub user: Value,
}

impl AuthState {
    /// Creates auth state from a token and user record.
    #[must_use]
    pub const fn new(auth_token: String, user: Value) -> Self {
        Self { auth_token, user }
    }
}
