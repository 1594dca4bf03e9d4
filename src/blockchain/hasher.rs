//! Canonical serialization and digest of blocks.
//!
//! The preimage is compact JSON with every object's keys sorted
//! lexicographically, so the hash depends only on content and never on
//! struct field order.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::Block;

/// Deterministic byte representation of a block.
pub fn canonicalize(block: &Block) -> Vec<u8> {
    canonical_bytes(block)
}

/// Lowercase hex SHA-256 over [`canonicalize`].
pub fn hash(block: &Block) -> String {
    sha256_hex(&canonicalize(block))
}

/// Canonical JSON bytes for any serializable record.
///
/// Going through `Value` re-keys every object into a sorted map before
/// writing, whatever order the fields were declared in.
pub fn canonical_bytes<T: Serialize>(record: &T) -> Vec<u8> {
    let value = serde_json::to_value(record).expect("record serializes to JSON");
    serde_json::to_vec(&sorted(value)).expect("JSON value serializes")
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sorted(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}
