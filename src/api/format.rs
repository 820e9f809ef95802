//! Wire envelopes the admin API wraps its payloads in.
//!
//! List endpoints answer either `{ "<plural>": [...] }` or a bare array, and
//! some also carry a `success` flag. These helpers accept every variant.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Decode a list that may be wrapped under `key` or sent bare.
/// A wrapped `null` or missing key is an empty list.
pub fn list_from_value<T: DeserializeOwned>(value: Value, key: &str) -> ClientResult<Vec<T>> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(inner) => inner,
        },
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ClientError::decode(format!(
                "expected a list of {} but got {}",
                key,
                type_name(&other)
            )))
        }
    };

    serde_json::from_value(items)
        .map_err(|e| ClientError::decode(format!("could not decode {}: {}", key, e)))
}

/// Decode a single object that may be wrapped under `key`. `null` means none.
pub fn item_from_value<T: DeserializeOwned>(value: Value, key: &str) -> ClientResult<Option<T>> {
    let inner = match value {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    };

    if inner.is_null() {
        return Ok(None);
    }

    serde_json::from_value(inner)
        .map(Some)
        .map_err(|e| ClientError::decode(format!("could not decode {}: {}", key, e)))
}

/// `Some(false)` only when the body explicitly says `"success": false`
pub fn success_flag(value: &Value) -> Option<bool> {
    value.get("success").and_then(Value::as_bool)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
