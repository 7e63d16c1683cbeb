//! Deterministic JSON canonicalization.
//!
//! Stable bytes for fingerprints:
//! - object keys are sorted lexicographically, at every depth
//! - arrays preserve order
//! - output is minified

use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize `value` as canonical JSON bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let v = sort_keys(serde_json::to_value(value)?);
    serde_json::to_vec(&v)
}

pub fn to_canonical_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v = sort_keys(serde_json::to_value(value)?);
    serde_json::to_string(&v)
}

fn sort_keys(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
