//! Identifier classification
//!
//! The UUID check runs first so a well-formed UUID never falls through to
//! short-code handling.

use crate::short_code::SHORT_CODE_LEN;
use serde::Serialize;
use uuid::Uuid;

/// Length of a hyphenated 8-4-4-4-12 UUID string
const HYPHENATED_UUID_LEN: usize = 36;

/// Shape of an external identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierClass {
    /// Canonical 8-4-4-4-12 hexadecimal UUID (any case)
    Uuid,
    /// At most eight characters and not UUID-shaped
    Short,
    /// Anything else; used verbatim as a canonical key
    Opaque,
}

impl IdentifierClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierClass::Uuid => "uuid",
            IdentifierClass::Short => "short",
            IdentifierClass::Opaque => "opaque",
        }
    }

    /// Whether a probe miss may fall back to a full scan
    pub fn allows_scan(&self) -> bool {
        !matches!(self, IdentifierClass::Opaque)
    }
}

impl std::fmt::Display for IdentifierClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an external identifier. Total: every string gets exactly one class.
pub fn classify(identifier: &str) -> IdentifierClass {
    if is_hyphenated_uuid(identifier) {
        IdentifierClass::Uuid
    } else if identifier.chars().count() <= SHORT_CODE_LEN {
        IdentifierClass::Short
    } else {
        IdentifierClass::Opaque
    }
}

/// True only for the hyphenated form.
///
/// `Uuid::try_parse` also accepts simple, braced and URN forms; at exactly
/// 36 bytes only the hyphenated form survives the parse.
pub fn is_hyphenated_uuid(identifier: &str) -> bool {
    identifier.len() == HYPHENATED_UUID_LEN && Uuid::try_parse(identifier).is_ok()
}

/// Drop internal `-` separators, e.g. a UUID's dashes
pub fn strip_separators(identifier: &str) -> String {
    identifier.chars().filter(|c| *c != '-').collect()
}
