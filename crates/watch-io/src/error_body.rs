//! Serializable error payloads for the resource API.

use serde::{Deserialize, Serialize};
use watch_core::ConversionError;
use watch_patch::{PatchError, ValidationError};

use crate::service::ServiceError;

/// Error payload: status, error kind, summary and per-field details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// `field:message` entries for validation failures, otherwise the cause.
    pub errors: Vec<String>,
}

impl ErrorBody {
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        let errors = match err {
            ServiceError::Invalid(v) => flatten(v),
            ServiceError::Patch(p) => patch_errors(p),
            _ => Vec::new(),
        };
        Self {
            status: err.status_code(),
            kind: err.kind().to_string(),
            message: summary(err),
            path: None,
            errors,
        }
    }
}

impl From<&PatchError> for ErrorBody {
    fn from(err: &PatchError) -> Self {
        Self {
            status: 400,
            kind: err.code().to_string(),
            message: match err {
                PatchError::Conversion(_) => "Patched watch cannot be read.".to_string(),
                PatchError::Validation(_) => "Patched watch is invalid.".to_string(),
            },
            path: None,
            errors: patch_errors(err),
        }
    }
}

impl From<&ValidationError> for ErrorBody {
    fn from(err: &ValidationError) -> Self {
        Self {
            status: 400,
            kind: "validation".to_string(),
            message: "Watch is invalid.".to_string(),
            path: None,
            errors: flatten(err),
        }
    }
}

impl From<&ConversionError> for ErrorBody {
    fn from(err: &ConversionError) -> Self {
        Self {
            status: 400,
            kind: "conversion".to_string(),
            message: "Watch cannot be read.".to_string(),
            path: None,
            errors: vec![err.to_string()],
        }
    }
}

fn summary(err: &ServiceError) -> String {
    match err {
        ServiceError::Invalid(_) => "Watch is invalid.".to_string(),
        ServiceError::Patch(p) => ErrorBody::from(p).message,
        other => other.to_string(),
    }
}

fn patch_errors(err: &PatchError) -> Vec<String> {
    match err {
        PatchError::Validation(v) => flatten(v),
        PatchError::Conversion(c) => vec![c.to_string()],
    }
}

fn flatten(err: &ValidationError) -> Vec<String> {
    err.violations.iter().map(|v| v.flattened()).collect()
}
