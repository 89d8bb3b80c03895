//! Fingerprints for Recommendation Records and Documents
//!
//! Records hash through canonical JSON so field order never changes the
//! digest. Documents hash their raw bytes.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Serialize with object keys sorted at every depth, no whitespace.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = sorted(serde_json::to_value(value)?);
    serde_json::to_string(&value)
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sorted(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

/// Fingerprint of a recommendation record (or any serializable record).
pub fn record_hash<T: Serialize>(record: &T) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(record)?.as_bytes()))
}

/// Fingerprint of emitted document bytes.
pub fn document_hash(bytes: &[u8]) -> String {
    sha256_hex(bytes)
}
