use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::apply::PatchError;

/// Deterministic, machine-readable summary of one patch application.
///
/// Notes:
/// - Contains *no* wall-clock timestamps (to preserve determinism).
/// - Member counts describe the patch document, recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchTelemetry {
    /// Operation category, e.g. "apply" or "merge".
    pub op: String,

    /// Whether the operation succeeded.
    pub ok: bool,

    /// Members that set a scalar or array value.
    pub members_set: usize,

    /// Members that remove a key (`null`).
    pub members_removed: usize,

    /// Members that merge a nested object.
    pub members_merged: usize,

    /// Whether the patch was not an object and so replaced the whole target.
    pub replaced_root: bool,

    /// Number of constraint violations (when validation failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<usize>,

    /// Optional machine-readable error code (when failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl PatchTelemetry {
    pub fn for_patch(op: &str, patch: &Value) -> Self {
        let mut t = Self {
            op: op.to_string(),
            ok: true,
            members_set: 0,
            members_removed: 0,
            members_merged: 0,
            replaced_root: !patch.is_object(),
            violations: None,
            error_code: None,
        };
        t.count_members(patch);
        t
    }

    /// Record the outcome of an apply.
    pub fn with_outcome<T>(mut self, outcome: &Result<T, PatchError>) -> Self {
        if let Err(e) = outcome {
            self.ok = false;
            self.error_code = Some(e.code().to_string());
            self.violations = e.violations().map(|v| v.violations.len());
        }
        self
    }

    fn count_members(&mut self, patch: &Value) {
        let Value::Object(members) = patch else {
            return;
        };
        for v in members.values() {
            match v {
                Value::Null => self.members_removed += 1,
                Value::Object(_) => {
                    self.members_merged += 1;
                    self.count_members(v);
                }
                _ => self.members_set += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_members_recursively() {
        let t = PatchTelemetry::for_patch("apply", &json!({"a": 1, "b": null, "c": {"d": [1], "e": null}}));
        assert_eq!((t.members_set, t.members_removed, t.members_merged), (2, 2, 1));
        assert!(!t.replaced_root);
        assert!(t.ok);
    }

    #[test]
    fn non_object_patch_replaces_root() {
        let t = PatchTelemetry::for_patch("merge", &json!([1, 2]));
        assert!(t.replaced_root);
        assert_eq!(t.members_set, 0);
    }

    #[test]
    fn skips_absent_optionals_in_json() {
        let t = PatchTelemetry::for_patch("apply", &json!({"price": 250}));
        let s = serde_json::to_string(&t).unwrap();
        assert!(!s.contains("error_code"));
        assert!(!s.contains("violations"));
    }
}
