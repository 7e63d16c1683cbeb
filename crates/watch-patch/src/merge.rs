//! JSON Merge Patch (RFC 7386).
//!
//! The algorithm is total over JSON values:
//! - a non-object patch replaces the target wholesale
//! - an object patch is merged member by member into the target, which is
//!   treated as `{}` when it is not an object
//! - a `null` member removes the key, an object member merges recursively,
//!   anything else (scalars, arrays) replaces the key's value

use serde_json::{Map, Value};

/// Apply `patch` to `target` and return the merged document.
///
/// `target` is left untouched.
pub fn apply_merge_patch(patch: &Value, target: &Value) -> Value {
    let mut out = target.clone();
    merge_patch_in_place(&mut out, patch);
    out
}

/// Apply `patch` to `target` in place.
pub fn merge_patch_in_place(target: &mut Value, patch: &Value) {
    let Value::Object(members) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(map) = target else {
        return;
    };

    for (key, value) in members {
        match value {
            Value::Null => {
                map.remove(key);
            }
            Value::Object(_) => {
                let slot = map.entry(key.clone()).or_insert_with(|| Value::Object(Map::new()));
                merge_patch_in_place(slot, value);
            }
            other => {
                map.insert(key.clone(), other.clone());
            }
        }
    }
}
