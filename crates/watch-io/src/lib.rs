//! `watch-io` is the single supported public entrypoint for the Watch resource:
//! the typed model, its structural JSON form, merge-patch application with
//! re-validation, and the resource service over a repository.
//!
//! HTTP routing, content negotiation and hypermedia links belong in higher
//! layers. This crate focuses on:
//! - stable types
//! - structural conversion and merge patch
//! - validation and error payloads
//! - configuration

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `watch_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

/// Deterministic JSON canonicalization helpers.
pub mod canonical_json;

/// TOML configuration.
pub mod config;

pub mod error_body;

/// Content fingerprints.
pub mod hashing;

pub mod repository;

pub mod service;

/// API constants.
pub mod version;

pub mod watch_json;

// Re-export the resource model and codec.
#[doc(hidden)]
pub mod core {
    pub use watch_core::structural::kind_of;
    pub use watch_core::{
        from_structural, from_structural_str, to_structural, ConversionError, Field, JsonKind, Structural, Watch,
        WatchId,
    };
}

// Re-export merge patch + validation.
#[doc(hidden)]
pub mod patch {
    pub use watch_patch::telemetry::PatchTelemetry;
    pub use watch_patch::{
        apply_merge_patch, apply_patch, apply_patch_with_validator, merge_patch_in_place, validate_watch,
        ConstraintViolation, PatchError, PatchErrorKind, PatchService, ValidationError, Validator,
        ViolationCode, WatchConstraints,
    };
}

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::core::{ConversionError, Structural, Watch, WatchId};
    pub use crate::error_body::ErrorBody;
    pub use crate::patch::{
        ConstraintViolation, PatchError, PatchErrorKind, PatchService, PatchTelemetry, ValidationError,
        Validator, ViolationCode, WatchConstraints,
    };
    pub use crate::repository::{InMemoryWatchRepository, WatchRepository};
    pub use crate::service::{ServiceError, WatchService};
    pub use crate::{canonical_json, hashing, version};
}
