#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the Watch API.

Do NOT depend on this crate directly.
Use `watch-io` instead.
"#]

pub mod model;
pub mod structural;

pub use model::{Watch, WatchId};
pub use structural::{from_structural, from_structural_str, to_structural, ConversionError, Field, JsonKind, Structural};
