//! Request composition for the RideWithGPS API.
//!
//! This module turns a method, path, and caller parameter map into a fully
//! composed [`ApiRequest`]: final URL (query string included), headers, and
//! optional JSON body.
//!
//! The placement rules are the subtle part. Auth parameters (`apikey`,
//! `version`, and a held `auth_token`) are injected unless the caller already
//! supplied them. For GET/PUT/DELETE every parameter is serialized into the
//! query string, flattening nested maps with the API's bracket convention.
//! For POST/PATCH only the control keys stay in the query string; everything
//! else becomes the JSON body. Auth fields never leak into a body.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Caller-supplied request parameters.
///
/// Values may be scalars or nested maps/arrays. The composition step treats
/// this as immutable input and works on its own copy, so a caller can reuse
/// one map across calls without it silently growing auth fields.
pub type Params = serde_json::Map<String, Value>;

/// HTTP methods supported by the RideWithGPS API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the uppercase wire form of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods that carry a structured JSON payload.
    ///
    /// These methods split parameters between the query string and the body;
    /// all other methods put everything in the query string.
    #[must_use]
    pub const fn carries_json_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A fully composed request, ready for the transport.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, query string included.
    pub url: String,
    /// Headers to send with the request.
    pub headers: HashMap<String, String>,
    /// The serialized JSON body, when the method carries one.
    pub body: Option<Vec<u8>>,
}

/// Parameter keys that belong in the query string even for body-carrying
/// methods: auth, protocol version, and pagination controls.
const QUERY_STRING_KEYS: [&str; 7] = [
    "apikey",
    "version",
    "auth_token",
    "page",
    "page_size",
    "offset",
    "limit",
];

/// Composes a request from a method, path, and caller parameters.
///
/// `params` is never mutated; injected auth fields land in an internal copy.
/// A caller-supplied `apikey`, `version`, or `auth_token` always wins over
/// the injected value.
///
/// The query string is sorted by key, so composed URLs are deterministic and
/// usable as cache keys.
#[must_use]
pub fn compose(
    method: HttpMethod,
    base_url: &str,
    path: &str,
    params: &Params,
    api_key: &str,
    version: u32,
    auth_token: Option<&str>,
) -> ApiRequest {
    let mut composed = params.clone();
    composed
        .entry("apikey")
        .or_insert_with(|| Value::from(api_key));
    composed
        .entry("version")
        .or_insert_with(|| Value::from(version));
    if let Some(token) = auth_token {
        composed
            .entry("auth_token")
            .or_insert_with(|| Value::from(token));
    }

    let mut headers = HashMap::new();
    headers.insert("x-rwgps-api-key".to_string(), api_key.to_string());

    let (query_params, body) = if method.carries_json_body() {
        let mut query = Params::new();
        let mut payload = Params::new();
        for (key, value) in composed {
            if QUERY_STRING_KEYS.contains(&key.as_str()) {
                query.insert(key, value);
            } else {
                payload.insert(key, value);
            }
        }
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let bytes = serde_json::to_vec(&Value::Object(payload))
            .unwrap_or_else(|_| b"{}".to_vec());
        (query, Some(bytes))
    } else {
        (composed, None)
    };

    let url = format!("{base_url}{path}?{}", encode_query(&query_params));

    ApiRequest {
        method,
        url,
        headers,
        body,
    }
}

/// Serializes a parameter map as a sorted, percent-encoded query string.
///
/// Nested maps flatten to `parent[child]=value` and arrays to `parent[]=value`,
/// the bracket convention the API itself uses. Pairs are sorted by key only:
/// an array flattens to repeated keys, and those must keep element order.
#[must_use]
pub fn encode_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten_into(key, value, &mut pairs);
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let encoded: Vec<String> = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect();
    encoded.join("&")
}

fn flatten_into(prefix: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten_into(&format!("{prefix}[{key}]"), nested, pairs);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_into(&format!("{prefix}[]"), item, pairs);
            }
        }
        Value::Null => pairs.push((prefix.to_string(), String::new())),
        Value::String(text) => pairs.push((prefix.to_string(), text.clone())),
        other => pairs.push((prefix.to_string(), other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_get_puts_everything_in_query_string() {
        let request = compose(
            HttpMethod::Get,
            "https://ridewithgps.com",
            "/test/path",
            &params(json!({"foo": "bar"})),
            "abc123",
            2,
            None,
        );

        assert_eq!(
            request.url,
            "https://ridewithgps.com/test/path?apikey=abc123&foo=bar&version=2"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_api_key_header_always_present() {
        let request = compose(
            HttpMethod::Get,
            "https://ridewithgps.com",
            "/endpoint",
            &Params::new(),
            "abc123",
            2,
            None,
        );

        assert_eq!(
            request.headers.get("x-rwgps-api-key"),
            Some(&"abc123".to_string())
        );
    }

    #[test]
    fn test_auth_token_injected_when_held() {
        let request = compose(
            HttpMethod::Get,
            "https://ridewithgps.com",
            "/trips.json",
            &Params::new(),
            "key",
            2,
            Some("T"),
        );

        assert!(request.url.contains("auth_token=T"));
    }

    #[test]
    fn test_caller_supplied_auth_params_win() {
        let request = compose(
            HttpMethod::Get,
            "https://ridewithgps.com",
            "/trips.json",
            &params(json!({"apikey": "theirs", "version": 9, "auth_token": "mine"})),
            "configured",
            2,
            Some("stored"),
        );

        assert!(request.url.contains("apikey=theirs"));
        assert!(request.url.contains("version=9"));
        assert!(request.url.contains("auth_token=mine"));
        assert!(!request.url.contains("configured"));
        assert!(!request.url.contains("stored"));
    }

    #[test]
    fn test_caller_params_are_not_mutated() {
        let caller = params(json!({"foo": "bar"}));
        let _ = compose(
            HttpMethod::Get,
            "https://ridewithgps.com",
            "/x",
            &caller,
            "key",
            2,
            Some("T"),
        );

        assert_eq!(caller.len(), 1);
        assert!(!caller.contains_key("apikey"));
        assert!(!caller.contains_key("auth_token"));
    }

    #[test]
    fn test_patch_splits_auth_to_query_and_payload_to_body() {
        let request = compose(
            HttpMethod::Patch,
            "https://ridewithgps.com",
            "/trips/284579245",
            &params(json!({"trip": {"gear_id": 254097}})),
            "test123",
            2,
            Some("tok"),
        );

        assert!(request.url.contains("/trips/284579245?"));
        assert!(request.url.contains("apikey=test123"));
        assert!(request.url.contains("version=2"));
        assert!(request.url.contains("auth_token=tok"));
        assert!(!request.url.contains("gear_id"));

        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        let body: Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body, json!({"trip": {"gear_id": 254097}}));
    }

    #[test]
    fn test_post_keeps_pagination_controls_in_query() {
        let request = compose(
            HttpMethod::Post,
            "https://ridewithgps.com",
            "/things.json",
            &params(json!({"page": 2, "page_size": 50, "thing": {"name": "x"}})),
            "key",
            2,
            None,
        );

        assert!(request.url.contains("page=2"));
        assert!(request.url.contains("page_size=50"));
        let body: Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body, json!({"thing": {"name": "x"}}));
    }

    #[test]
    fn test_put_serializes_nested_params_with_brackets() {
        let request = compose(
            HttpMethod::Put,
            "https://ridewithgps.com",
            "/trips/123.json",
            &params(json!({"trip": {"name": "Morning Ride"}})),
            "key",
            2,
            None,
        );

        assert!(request.url.contains("trip%5Bname%5D=Morning%20Ride"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_encode_query_flattens_arrays() {
        let query = encode_query(&params(json!({"ids": [1, 2]})));
        assert_eq!(query, "ids%5B%5D=1&ids%5B%5D=2");
    }

    #[test]
    fn test_encode_query_keeps_array_element_order() {
        // Repeated `ids[]` keys must come out in caller order, not value order.
        let query = encode_query(&params(json!({"ids": [3, 1, 2]})));
        assert_eq!(query, "ids%5B%5D=3&ids%5B%5D=1&ids%5B%5D=2");

        // Key-level sorting still applies around the run of repeated keys.
        let query = encode_query(&params(json!({"z": 1, "ids": ["b", "a"], "a": 2})));
        assert_eq!(query, "a=2&ids%5B%5D=b&ids%5B%5D=a&z=1");
    }

    #[test]
    fn test_encode_query_sorts_pairs() {
        let query = encode_query(&params(json!({"b": 1, "a": 2, "apikey": "k"})));
        assert_eq!(query, "a=2&apikey=k&b=1");
    }

    #[test]
    fn test_encode_query_renders_scalars() {
        let query = encode_query(&params(json!({"s": "x y", "n": 7, "f": 1.5, "t": true, "z": null})));
        assert_eq!(query, "f=1.5&n=7&s=x%20y&t=true&z=");
    }
}
