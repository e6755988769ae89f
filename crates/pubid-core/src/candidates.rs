//! Probe candidate generation
//!
//! Candidates are syntactic guesses; only a store hit makes one correct.

use crate::classify::IdentifierClass;
use crate::model::DRAFT_PREFIX;

/// Build the ordered list of canonical keys to probe.
///
/// UUID and short identifiers yield `[raw, type.raw, drafts.type.raw]`.
/// Opaque identifiers are already canonical and yield only themselves.
pub fn generate_candidates(
    resource_type: &str,
    identifier: &str,
    class: IdentifierClass,
) -> Vec<String> {
    match class {
        IdentifierClass::Opaque => vec![identifier.to_string()],
        IdentifierClass::Uuid | IdentifierClass::Short => {
            let typed = type_prefixed(resource_type, identifier);
            let draft = format!("{}{}", DRAFT_PREFIX, typed);
            vec![identifier.to_string(), typed, draft]
        }
    }
}

fn type_prefixed(resource_type: &str, suffix: &str) -> String {
    format!("{}.{}", resource_type, suffix)
}
