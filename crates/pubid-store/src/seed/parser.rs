//! Seed parser with validation
//!
//! Checks the schema version, non-empty types and ids, and id uniqueness
//! within each type. Every id must also derive a non-blank short code, or the
//! record could never be reached from a short link.

use crate::errors::{io_error, Result};
use crate::seed::format_v0::SeedV0;
use pubid_core::errors::{ExError, ResolveError};
use pubid_core::short_code;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
///
/// # Errors
///
/// - `Io` if the file cannot be read
/// - `InvalidInput` if the content is malformed or fails validation
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;
    parse_seed_str(&content)
}

/// Parse a seed from a string; JSON is accepted as a YAML subset
///
/// # Errors
///
/// - `InvalidInput` if the content is malformed or fails validation
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| invalid_seed(format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(invalid_seed(format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for doc in &seed.documents {
        if doc.doc_type.trim().is_empty() {
            return Err(invalid_seed(format!(
                "Document {} has an empty type",
                doc.id
            )));
        }
        if doc.id.trim().is_empty() {
            return Err(invalid_seed(format!(
                "Document of type {} has an empty id",
                doc.doc_type
            )));
        }
        if short_code(&doc.id).trim().is_empty() {
            return Err(invalid_seed(format!(
                "Document id {} ends in an empty segment and has no short code",
                doc.id
            )));
        }
        if !seen.insert((doc.doc_type.as_str(), doc.id.as_str())) {
            return Err(invalid_seed(format!(
                "Duplicate id {} for type {}",
                doc.id, doc.doc_type
            )));
        }
    }

    Ok(())
}

fn invalid_seed(reason: String) -> ExError {
    ResolveError::InvalidSeed { reason }.into()
}
