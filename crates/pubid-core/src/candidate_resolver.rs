//! Multi-hit candidate selection.
//!
//! When a probe or scan yields more than one canonical key, the configured
//! ambiguity policy picks one or rejects the request.

use serde::{Deserialize, Serialize};

use crate::errors::{ExError, ResolveError};
use crate::model::{published_key, same_logical_record, Variant};

/// Ambiguity policy for multi-hit selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// First hit in generation (probe) or priority (scan) order.
    #[default]
    FirstInOrder,
    /// First published hit; falls back to the first hit if all are drafts.
    PreferPublished,
    /// Fail when the hits span more than one logical record.
    Reject,
}

impl AmbiguityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmbiguityPolicy::FirstInOrder => "first_in_order",
            AmbiguityPolicy::PreferPublished => "prefer_published",
            AmbiguityPolicy::Reject => "reject",
        }
    }

    /// Whether a first match is final, so a scan may stop early.
    pub fn stops_at_first_match(&self) -> bool {
        matches!(self, AmbiguityPolicy::FirstInOrder)
    }
}

/// Pick one key from `hits`, which must already be in priority order.
///
/// Returns `Ok(None)` for an empty slice.
///
/// # Errors
///
/// - `ExErrorKind::AmbiguousMatch` under `Reject` when hits name two or more
///   distinct logical records. A draft and its published twin are one record.
pub fn select_candidate(
    identifier: &str,
    hits: &[String],
    policy: AmbiguityPolicy,
) -> Result<Option<String>, ExError> {
    let Some(first) = hits.first() else {
        return Ok(None);
    };

    match policy {
        AmbiguityPolicy::FirstInOrder => Ok(Some(first.clone())),
        AmbiguityPolicy::PreferPublished => Ok(Some(prefer_published(hits).clone())),
        AmbiguityPolicy::Reject => {
            if hits.iter().all(|h| same_logical_record(h, first)) {
                return Ok(Some(prefer_published(hits).clone()));
            }
            let mut distinct: Vec<String> = Vec::new();
            for hit in hits {
                if !distinct.iter().any(|d| same_logical_record(d, hit)) {
                    distinct.push(published_key(hit).to_string());
                }
            }
            Err(ResolveError::AmbiguousCandidates {
                identifier: identifier.to_string(),
                candidates: distinct,
            }
            .into())
        }
    }
}

fn prefer_published(hits: &[String]) -> &String {
    hits.iter()
        .find(|h| Variant::of(h) == Variant::Published)
        .unwrap_or(&hits[0])
}
