use serde::Serialize;
use sha2::{Digest, Sha256};
use sweep_core::errors::SweepError;

use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal SHA-256 digest of the canonical JSON form.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SweepError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
