//! Parsing Watch JSON payloads with field-level diagnostics.

use watch_core::{from_structural_str, ConversionError, Watch};

/// Parse a Watch JSON document (the structural form).
///
/// Unknown members such as hypermedia `_links` are ignored.
pub fn parse_watch_json_str(s: &str) -> Result<Watch, ConversionError> {
    from_structural_str(s)
}

/// Pretty JSON of the structural form.
pub fn to_pretty_json(watch: &Watch) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&watch_core::to_structural(watch))
}
