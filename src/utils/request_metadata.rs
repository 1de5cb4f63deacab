//! Request-header snapshot taken on each redirect.

use axum::http::HeaderMap;
use serde_json::{Map, Value};

/// Headers that must never reach the visit store.
///
/// This is a privacy boundary: credential-bearing headers are stripped
/// before the snapshot is built, not filtered at display time.
const EXCLUDED_HEADERS: &[&str] = &[
    "cookie",
    "set-cookie",
    "authorization",
    "proxy-authorization",
];

/// Builds the metadata snapshot recorded alongside a visit.
///
/// Captures every header of the inbound request as a JSON object, except the
/// credential headers in [`EXCLUDED_HEADERS`]. Repeated headers are joined
/// with `", "`, matching how proxies fold them. Values that are not valid
/// UTF-8 are skipped.
pub fn snapshot(headers: &HeaderMap) -> Value {
    let mut map = Map::new();

    for (name, value) in headers {
        let key = name.as_str();
        if EXCLUDED_HEADERS.contains(&key) {
            continue;
        }
        let Ok(text) = value.to_str() else { continue };

        match map.get_mut(key) {
            Some(Value::String(existing)) => {
                existing.push_str(", ");
                existing.push_str(text);
            }
            _ => {
                map.insert(key.to_string(), Value::String(text.to_string()));
            }
        }
    }

    Value::Object(map)
}
