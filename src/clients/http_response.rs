//! Response normalization for the RideWithGPS API.
//!
//! Every response body, whatever its shape, becomes a [`serde_json::Value`]:
//!
//! - empty bodies normalize to an empty object (some successful writes return
//!   no content)
//! - JSON bodies parse as-is
//! - non-JSON bodies are wrapped under a `response_text` field (some
//!   endpoints legitimately return plain text on success)
//!
//! Normalization is total: it never fails, so callers never see a parse error
//! for a response the server considered successful. Field access degrades the
//! same way — `Value::get` returns `None` for absent fields rather than
//! failing, which is the contract list consumers rely on.

use serde_json::Value;

/// The field under which an unparseable body is exposed.
pub const RESPONSE_TEXT_KEY: &str = "response_text";

/// Converts raw body bytes into a structured value.
///
/// This function cannot fail; malformed input degrades through the cases
/// described at module level.
#[must_use]
pub fn normalize(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Object(serde_json::Map::new());
    }

    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(bytes).into_owned();
        tracing::debug!("non-JSON response body, exposing as {RESPONSE_TEXT_KEY}");
        serde_json::json!({ RESPONSE_TEXT_KEY: text })
    })
}

/// Pagination metadata read from a normalized list response.
///
/// The two endpoint generations report progress differently: current
/// endpoints nest a next-page indicator under `meta.pagination`, legacy
/// endpoints carry a flat `results_count`. Both are optional — a response
/// missing them simply ends iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Whether `meta.pagination.next_page_url` names a further page.
    pub has_next_page: bool,
    /// The flat `results_count` total, when the endpoint reports one.
    pub results_count: Option<u64>,
}

impl PageMeta {
    /// Extracts pagination metadata from a normalized response value.
    #[must_use]
    pub fn from_response(response: &Value) -> Self {
        let has_next_page = response
            .get("meta")
            .and_then(|meta| meta.get("pagination"))
            .and_then(|pagination| pagination.get("next_page_url"))
            .and_then(Value::as_str)
            .is_some_and(|url| !url.is_empty());

        let results_count = response.get("results_count").and_then(Value::as_u64);

        Self {
            has_next_page,
            results_count,
        }
    }
}
