pub mod apply;
pub mod diagnostics;
pub mod merge;
pub mod telemetry;
pub mod validate;

pub use apply::{apply_patch, apply_patch_with_validator, PatchError, PatchErrorKind, PatchService};
pub use diagnostics::{ConstraintViolation, ValidationError, ViolationCode};
pub use merge::{apply_merge_patch, merge_patch_in_place};
pub use validate::{validate_watch, Validator, WatchConstraints};
