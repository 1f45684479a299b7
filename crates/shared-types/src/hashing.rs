//! Keccak-256 helpers.

use crate::value_objects::Hash;
use sha3::{Digest, Keccak256};

/// Keccak-256 of a single buffer.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 over several buffers, equivalent to hashing their concatenation.
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
