//! Fallback scan heuristics
//!
//! Matching runs over a full key listing and never touches the store. Records
//! are visited in listing order; each record is tested against the rules in
//! [`MatchRule`] order and takes the first rule it satisfies.

use serde::Serialize;

use crate::candidate_resolver::{select_candidate, AmbiguityPolicy};
use crate::classify::{strip_separators, IdentifierClass};
use crate::errors::ExError;
use crate::model::DocumentKey;
use crate::short_code::{short_code, SHORT_CODE_LEN};

/// Heuristic that matched a record, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Lowercased key contains the identifier, dashed or dash-stripped
    KeyContains,
    /// Derived short code equals the identifier's first eight characters
    ShortCode,
    /// Key starts with or contains the identifier, case preserved
    KeyPrefix,
    /// A `.` segment of the key equals or contains the UUID (UUID only)
    UuidSegment,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::KeyContains => "key_contains",
            MatchRule::ShortCode => "short_code",
            MatchRule::KeyPrefix => "key_prefix",
            MatchRule::UuidSegment => "uuid_segment",
        }
    }
}

/// A record chosen by the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    pub key: String,
    pub rule: MatchRule,
    /// Records examined before the scan stopped
    pub scanned: usize,
}

/// Precomputed forms of the identifier being matched
struct Needle {
    class: IdentifierClass,
    lower: String,
    stripped: String,
    prefix: String,
}

impl Needle {
    fn new(identifier: &str, class: IdentifierClass) -> Self {
        let lower = identifier.to_lowercase();
        let stripped = strip_separators(&lower);
        let prefix = lower.chars().take(SHORT_CODE_LEN).collect();
        Self {
            class,
            lower,
            stripped,
            prefix,
        }
    }

    fn stripped(&self) -> Option<&str> {
        (!self.stripped.is_empty()).then_some(self.stripped.as_str())
    }
}

/// First rule `key` satisfies for `needle`, if any
fn rule_for(key: &str, needle: &Needle) -> Option<MatchRule> {
    let key_lower = key.to_lowercase();

    if key_lower.contains(&needle.lower)
        || needle.stripped().is_some_and(|s| key_lower.contains(s))
    {
        return Some(MatchRule::KeyContains);
    }

    if short_code(key) == needle.prefix {
        return Some(MatchRule::ShortCode);
    }

    if key.starts_with(&needle.lower) || key.contains(&needle.lower) {
        return Some(MatchRule::KeyPrefix);
    }

    if needle.class == IdentifierClass::Uuid {
        let segment_hit = key_lower.split('.').any(|segment| {
            segment == needle.lower
                || segment.contains(&needle.lower)
                || needle
                    .stripped()
                    .is_some_and(|s| segment == s || segment.contains(s))
        });
        if segment_hit {
            return Some(MatchRule::UuidSegment);
        }
    }

    None
}

/// Match `identifier` against a full key listing.
///
/// Under `FirstInOrder` the first matching record wins and the listing is
/// not read further. Other policies gather every record matched by the best
/// rule seen and hand them to [`select_candidate`] in listing order.
///
/// An empty identifier never matches.
///
/// # Errors
///
/// - `ExErrorKind::AmbiguousMatch` when the policy rejects the gathered set.
pub fn scan_keys(
    keys: &[DocumentKey],
    identifier: &str,
    class: IdentifierClass,
    policy: AmbiguityPolicy,
) -> Result<Option<ScanMatch>, ExError> {
    if identifier.trim().is_empty() {
        return Ok(None);
    }
    let needle = Needle::new(identifier, class);

    if policy.stops_at_first_match() {
        return Ok(keys.iter().enumerate().find_map(|(i, k)| {
            rule_for(&k.key, &needle).map(|rule| ScanMatch {
                key: k.key.clone(),
                rule,
                scanned: i + 1,
            })
        }));
    }

    let mut best: Option<MatchRule> = None;
    let mut hits: Vec<String> = Vec::new();
    for k in keys {
        let Some(rule) = rule_for(&k.key, &needle) else {
            continue;
        };
        match best {
            Some(current) if rule > current => {}
            Some(current) if rule == current => hits.push(k.key.clone()),
            _ => {
                best = Some(rule);
                hits.clear();
                hits.push(k.key.clone());
            }
        }
    }

    let Some(rule) = best else {
        return Ok(None);
    };
    let selected = select_candidate(identifier, &hits, policy)?;
    Ok(selected.map(|key| ScanMatch {
        key,
        rule,
        scanned: keys.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    fn listing(ids: &[&str]) -> Vec<DocumentKey> {
        ids.iter().map(|k| DocumentKey::new(*k)).collect()
    }

    fn first(keys: &[DocumentKey], id: &str, class: IdentifierClass) -> Option<ScanMatch> {
        scan_keys(keys, id, class, AmbiguityPolicy::FirstInOrder).unwrap()
    }

    #[test]
    fn test_key_contains_is_case_insensitive() {
        let keys = listing(&["event.ABC12345xyz"]);
        let m = first(&keys, "abc12345", IdentifierClass::Short).unwrap();
        assert_eq!(m.key, "event.ABC12345xyz");
        assert_eq!(m.rule, MatchRule::KeyContains);
    }

    #[test]
    fn test_dash_stripped_uuid_matches_undashed_key() {
        let keys = listing(&["event.c497b2fef21b4ab7ac814cf5febfea50"]);
        let m = first(
            &keys,
            "c497b2fe-f21b-4ab7-ac81-4cf5febfea50",
            IdentifierClass::Uuid,
        )
        .unwrap();
        assert_eq!(m.rule, MatchRule::KeyContains);
    }

    #[test]
    fn test_short_code_rule_uses_identifier_prefix() {
        let keys = listing(&["event.q1w2e3r4"]);
        let m = first(&keys, "q1w2e3r4", IdentifierClass::Short).unwrap();
        assert_eq!(m.rule, MatchRule::KeyContains);

        // Key segment is only a prefix of the identifier, so substring rules
        // fail and the derived short code decides.
        let m = first(&keys, "Q1W2E3R4-extra", IdentifierClass::Opaque).unwrap();
        assert_eq!(m.rule, MatchRule::ShortCode);
    }

    #[test]
    fn test_first_matching_record_wins_in_listing_order() {
        let keys = listing(&["event.zzz", "event.abc-one", "event.abc-two"]);
        let m = first(&keys, "abc", IdentifierClass::Short).unwrap();
        assert_eq!(m.key, "event.abc-one");
        assert_eq!(m.scanned, 2);
    }

    #[test]
    fn test_no_match_returns_none() {
        let keys = listing(&["event.abc12345", "event.def67890"]);
        assert!(first(&keys, "zzzzzzzz", IdentifierClass::Short).is_none());
    }

    #[test]
    fn test_empty_identifier_never_matches() {
        let keys = listing(&["event.abc"]);
        assert!(first(&keys, "", IdentifierClass::Short).is_none());
        assert!(first(&keys, "   ", IdentifierClass::Short).is_none());
    }

    #[test]
    fn test_all_dash_identifier_does_not_match_everything() {
        let keys = listing(&["event.abc"]);
        assert!(first(&keys, "---", IdentifierClass::Short).is_none());
    }

    #[test]
    fn test_prefer_published_keeps_best_rule_only() {
        let keys = listing(&["drafts.event.abc12345", "event.abc12345", "abc"]);
        let m = scan_keys(
            &keys,
            "abc12345",
            IdentifierClass::Short,
            AmbiguityPolicy::PreferPublished,
        )
        .unwrap()
        .unwrap();
        assert_eq!(m.key, "event.abc12345");
        assert_eq!(m.scanned, 3);
    }

    #[test]
    fn test_reject_policy_surfaces_collision() {
        let keys = listing(&["event.abc12345aaa", "event.abc12345bbb"]);
        let err = scan_keys(
            &keys,
            "abc12345",
            IdentifierClass::Short,
            AmbiguityPolicy::Reject,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::AmbiguousMatch);
    }
}
