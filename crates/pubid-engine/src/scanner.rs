//! Fallback scan: one full key listing, then in-memory matching.
//!
//! Linear in the number of records of the type. Only reached after a total
//! probe miss on a UUID or short identifier.

use pubid_core::candidate_resolver::AmbiguityPolicy;
use pubid_core::classify::IdentifierClass;
use pubid_core::errors::{ExError, ExErrorKind, Result};
use pubid_core::scan::{scan_keys, ScanMatch};
use pubid_store::DocumentStore;

/// List every key of `resource_type` and match `identifier` against them.
///
/// # Errors
///
/// - `StoreUnavailable` if the listing fails
/// - `AmbiguousMatch` when the policy rejects the matched set
pub async fn scan(
    store: &dyn DocumentStore,
    resource_type: &str,
    identifier: &str,
    class: IdentifierClass,
    policy: AmbiguityPolicy,
) -> Result<Option<ScanMatch>> {
    let keys = store.list_keys(resource_type).await.map_err(|e| {
        ExError::new(ExErrorKind::StoreUnavailable)
            .with_op("scan")
            .with_resource_type(resource_type)
            .with_entity_id(identifier)
            .with_message("key listing failed")
            .with_source(e)
    })?;

    let found = scan_keys(&keys, identifier, class, policy)?;
    match &found {
        Some(m) => tracing::debug!(
            op = "scan",
            rule = m.rule.as_str(),
            scanned_count = m.scanned,
            canonical_key = %m.key,
            "matched"
        ),
        None => tracing::debug!(op = "scan", scanned_count = keys.len(), "exhausted"),
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubid_core::{Document, MatchRule};
    use pubid_store::MemoryStore;

    #[tokio::test]
    async fn test_single_listing_per_scan() {
        let store = MemoryStore::with_documents([
            Document::new("event", "event.one"),
            Document::new("event", "event.abc12345xyz"),
        ]);

        let m = scan(
            &store,
            "event",
            "abc12345",
            IdentifierClass::Short,
            AmbiguityPolicy::FirstInOrder,
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(m.key, "event.abc12345xyz");
        assert_eq!(m.rule, MatchRule::KeyContains);
        assert_eq!(store.list_calls(), 1);
        assert_eq!(store.get_calls(), 0);
    }

    #[tokio::test]
    async fn test_listing_failure_is_store_unavailable() {
        let store = MemoryStore::new();
        store.fail_list(true);

        let err = scan(
            &store,
            "event",
            "abc",
            IdentifierClass::Short,
            AmbiguityPolicy::FirstInOrder,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
    }
}
