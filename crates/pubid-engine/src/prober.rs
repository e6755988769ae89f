//! Parallel probing of candidate keys.
//!
//! All lookups run concurrently and are joined before any result is used, so
//! selection always sees the full hit set in generation order.

use futures::future::join_all;
use pubid_core::candidate_resolver::{select_candidate, AmbiguityPolicy};
use pubid_core::errors::{ExError, ExErrorKind, Result};
use pubid_core::model::Document;
use pubid_store::DocumentStore;

/// The candidate a probe settled on
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeHit {
    pub key: String,
    pub document: Document,
    /// Position of `key` in the generated candidate list
    pub candidate_index: usize,
}

/// Probe every candidate and select one hit.
///
/// A failed lookup counts as a miss for that candidate. Returns `Ok(None)`
/// when nothing hit and at least one lookup answered.
///
/// # Errors
///
/// - `StoreUnavailable` when every lookup failed; the first failure is the source
/// - `AmbiguousMatch` when the policy rejects the hit set
pub async fn probe(
    store: &dyn DocumentStore,
    resource_type: &str,
    identifier: &str,
    candidates: &[String],
    policy: AmbiguityPolicy,
) -> Result<Option<ProbeHit>> {
    let lookups = candidates
        .iter()
        .map(|candidate| store.get_by_key(resource_type, candidate));
    let results = join_all(lookups).await;

    let mut hits: Vec<(usize, Document)> = Vec::new();
    let mut failures: Vec<ExError> = Vec::new();
    for (index, (candidate, result)) in candidates.iter().zip(results).enumerate() {
        match result {
            Ok(Some(document)) => {
                tracing::debug!(op = "probe", candidate = %candidate, "hit");
                hits.push((index, document));
            }
            Ok(None) => {
                tracing::debug!(op = "probe", candidate = %candidate, "miss");
            }
            Err(err) => {
                tracing::warn!(
                    op = "probe",
                    candidate = %candidate,
                    err_code = err.code(),
                    "lookup failed"
                );
                failures.push(err);
            }
        }
    }

    if hits.is_empty() && !candidates.is_empty() && failures.len() == candidates.len() {
        let mut err = ExError::new(ExErrorKind::StoreUnavailable)
            .with_op("probe")
            .with_resource_type(resource_type)
            .with_entity_id(identifier)
            .with_message(format!("all {} probe lookups failed", candidates.len()));
        if let Some(first) = failures.into_iter().next() {
            err = err.with_source(first);
        }
        return Err(err);
    }

    let hit_keys: Vec<String> = hits.iter().map(|(i, _)| candidates[*i].clone()).collect();
    let Some(selected) = select_candidate(identifier, &hit_keys, policy)? else {
        return Ok(None);
    };

    Ok(hits
        .into_iter()
        .find(|(i, _)| candidates[*i] == selected)
        .map(|(candidate_index, document)| ProbeHit {
            key: selected,
            document,
            candidate_index,
        }))
}
