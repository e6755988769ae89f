//! Seed digest canonicalization
//!
//! SHA-256 over the canonical JSON form of a parsed seed. Object keys in
//! `serde_json::Value` are sorted, so formatting and key order in the
//! source file do not change the digest.

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use sha2::{Digest, Sha256};

/// Compute the canonical digest of a seed
///
/// # Errors
///
/// - `Serialization` if the seed cannot be encoded
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let canonical = serde_json::to_value(seed)?;
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
