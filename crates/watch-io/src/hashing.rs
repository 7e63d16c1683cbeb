//! Content fingerprints.

use serde::Serialize;
use sha2::{Digest, Sha256};
use watch_core::{to_structural, Watch};

use crate::canonical_json::to_canonical_json_bytes;

/// Lowercase hex SHA-256 of bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn sha256_canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(&to_canonical_json_bytes(value)?))
}

/// Fingerprint of a watch's structural form, `sha256:<hex>`.
///
/// Two watches share a fingerprint exactly when their structural forms are
/// equal, identifier included.
pub fn fingerprint(watch: &Watch) -> Result<String, serde_json::Error> {
    Ok(format!("sha256:{}", sha256_canonical_json(&to_structural(watch))?))
}
