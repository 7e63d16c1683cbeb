use serde_json::Value;
use thiserror::Error;
use watch_core::{from_structural, to_structural, ConversionError, Structural, Watch};

use crate::diagnostics::ValidationError;
use crate::merge::merge_patch_in_place;
use crate::validate::{Validator, WatchConstraints};

/// Why a patch could not produce a valid resource.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patched document cannot be converted: {0}")]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchErrorKind {
    Conversion,
    Validation,
}

impl PatchError {
    pub fn kind(&self) -> PatchErrorKind {
        match self {
            PatchError::Conversion(_) => PatchErrorKind::Conversion,
            PatchError::Validation(_) => PatchErrorKind::Validation,
        }
    }

    /// Stable code for telemetry and error bodies.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            PatchErrorKind::Conversion => "conversion",
            PatchErrorKind::Validation => "validation",
        }
    }

    pub fn violations(&self) -> Option<&ValidationError> {
        match self {
            PatchError::Validation(v) => Some(v),
            PatchError::Conversion(_) => None,
        }
    }
}

/// Applies merge patches to typed resources and re-validates the result.
///
/// Stateless apart from the rule set; safe to share across threads when `V` is.
#[derive(Debug, Clone, Default)]
pub struct PatchService<V> {
    validator: V,
}

impl<V> PatchService<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Encode `current`, merge `patch` into it, decode and validate.
    ///
    /// `current` is never modified; on error nothing of the patch is kept.
    pub fn apply_patch<T>(&self, patch: &Value, current: &T) -> Result<T, PatchError>
    where
        T: Structural,
        V: Validator<T>,
    {
        let mut doc = to_structural(current);
        merge_patch_in_place(&mut doc, patch);

        let candidate: T = from_structural(&doc).inspect_err(|e| {
            tracing::debug!(error = %e, "patched document failed to convert");
        })?;

        self.validate(&candidate)?;
        Ok(candidate)
    }

    pub fn validate<T>(&self, candidate: &T) -> Result<(), ValidationError>
    where
        V: Validator<T>,
    {
        match ValidationError::from_violations(self.validator.validate(candidate)) {
            Some(err) => {
                tracing::debug!(violations = err.violations.len(), "resource failed validation");
                Err(err)
            }
            None => Ok(()),
        }
    }
}

/// Apply a merge patch to a watch under the default constraints.
pub fn apply_patch(patch: &Value, current: &Watch) -> Result<Watch, PatchError> {
    PatchService::new(WatchConstraints::default()).apply_patch(patch, current)
}

pub fn apply_patch_with_validator<V: Validator<Watch>>(
    patch: &Value,
    current: &Watch,
    validator: V,
) -> Result<Watch, PatchError> {
    PatchService::new(validator).apply_patch(patch, current)
}
