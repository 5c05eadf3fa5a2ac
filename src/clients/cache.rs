//! Optional response caching for the client.
//!
//! The cache is a plain key-to-bytes store keyed on the fully composed
//! request (method, URL, and body). When enabled, the client checks the cache
//! before calling the transport and populates it after a successful call.
//! When disabled, caching is bypassed entirely.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::clients::http_request::ApiRequest;

/// A key-to-bytes response store.
///
/// Implementations must be safe to call from multiple threads. Entries are
/// raw body bytes as returned by the transport; normalization happens after
/// the cache, so hits and misses produce identical values.
pub trait ResponseCache: Send + Sync {
    /// Returns the cached body for `key`, if present.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `bytes` under `key`, replacing any previous entry.
    fn put(&self, key: &str, bytes: &[u8]);

    /// Removes every entry.
    fn clear(&self);
}

/// Derives the cache key for a composed request.
///
/// The key covers method, full URL (including the query string), and body, so
/// two requests differing only in pagination parameters never collide.
#[must_use]
pub fn cache_key(request: &ApiRequest) -> String {
    let body = request
        .body
        .as_deref()
        .map_or_else(String::new, |b| String::from_utf8_lossy(b).into_owned());
    format!("{} {}\n{}", request.method.as_str(), request.url, body)
}

/// An in-memory [`ResponseCache`] backed by a mutex-guarded map.
///
/// This is the store used when the client is configured with
/// `cache_enabled(true)`. It lives for the lifetime of the client.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .map_or(None, |entries| entries.get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), bytes.to_vec());
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
