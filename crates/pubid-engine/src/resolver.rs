//! Public identifier resolver.
//!
//! Runs an explicit state machine:
//!
//! ```text
//! Start -> Classified -> (probe) -> Resolved
//!                                -> Probed -> (scan) -> Scanned -> Resolved | NotFound
//!                                -> NotFound            (opaque, or scan disabled)
//! any store-touching step        -> StoreError
//! ```
//!
//! `Probed` means the probe finished without a hit. `StoreError` is terminal
//! and never turns into `NotFound`. `Rejected` is reachable only under the
//! `reject` ambiguity policy.

use std::sync::Arc;
use std::time::Instant;

use pubid_core::candidate_resolver::AmbiguityPolicy;
use pubid_core::classify::{classify, IdentifierClass};
use pubid_core::config::ResolverConfig;
use pubid_core::errors::{ExError, ExErrorKind, ResolveError, Result};
use pubid_core::model::Document;
use pubid_core::scan::{MatchRule, ScanMatch};
use pubid_core::{generate_candidates, log_op_end, log_op_error, log_op_start};
use pubid_core_types::schema::EVENT_TRANSITION;
use pubid_core_types::RequestContext;
use pubid_store::DocumentStore;

use crate::prober::{probe, ProbeHit};
use crate::scanner::scan;

const OP_RESOLVE: &str = "resolve";

/// How a canonical key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    /// Direct keyed lookup of a generated candidate
    Probe { candidate_index: usize },
    /// Full listing matched by a heuristic
    Scan { rule: MatchRule, scanned: usize },
}

impl ResolvedVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedVia::Probe { .. } => "probe",
            ResolvedVia::Scan { .. } => "scan",
        }
    }
}

/// A successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub canonical_key: String,
    pub class: IdentifierClass,
    pub via: ResolvedVia,
    /// Present when the key came from a probe, which fetches the record
    pub document: Option<Document>,
}

/// Resolver states
#[derive(Debug)]
pub enum ResolveState {
    Start,
    Classified { class: IdentifierClass },
    Probed { class: IdentifierClass },
    Scanned {
        class: IdentifierClass,
        found: Option<ScanMatch>,
    },
    Resolved(Resolution),
    NotFound(ExError),
    StoreError(ExError),
    Rejected(ExError),
}

impl ResolveState {
    pub fn name(&self) -> &'static str {
        match self {
            ResolveState::Start => "start",
            ResolveState::Classified { .. } => "classified",
            ResolveState::Probed { .. } => "probed",
            ResolveState::Scanned { .. } => "scanned",
            ResolveState::Resolved(_) => "resolved",
            ResolveState::NotFound(_) => "not_found",
            ResolveState::StoreError(_) => "store_error",
            ResolveState::Rejected(_) => "rejected",
        }
    }

    fn terminal(self) -> std::result::Result<Result<Resolution>, Self> {
        match self {
            ResolveState::Resolved(r) => Ok(Ok(r)),
            ResolveState::NotFound(e) | ResolveState::StoreError(e) | ResolveState::Rejected(e) => {
                Ok(Err(e))
            }
            other => Err(other),
        }
    }
}

/// Stateless resolver over a shared read-only store.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn DocumentStore>,
    policy: AmbiguityPolicy,
    fallback_scan: bool,
}

impl Resolver {
    /// Resolver with the default policy and fallback scan enabled
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            policy: AmbiguityPolicy::default(),
            fallback_scan: true,
        }
    }

    pub fn from_config(store: Arc<dyn DocumentStore>, config: &ResolverConfig) -> Self {
        Self {
            store,
            policy: config.ambiguity_policy,
            fallback_scan: config.fallback_scan,
        }
    }

    pub fn with_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_fallback_scan(mut self, enabled: bool) -> Self {
        self.fallback_scan = enabled;
        self
    }

    pub fn policy(&self) -> AmbiguityPolicy {
        self.policy
    }

    /// Resolve `identifier` to the canonical key of a `resource_type` record.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no record matches (or the identifier is blank)
    /// - `StoreUnavailable` when the store could not answer
    /// - `AmbiguousMatch` under the `reject` policy
    pub async fn resolve(&self, resource_type: &str, identifier: &str) -> Result<Resolution> {
        self.resolve_with_context(&RequestContext::new(), resource_type, identifier)
            .await
    }

    /// [`Resolver::resolve`] with caller-supplied correlation ids.
    ///
    /// # Errors
    ///
    /// Same as [`Resolver::resolve`].
    pub async fn resolve_with_context(
        &self,
        ctx: &RequestContext,
        resource_type: &str,
        identifier: &str,
    ) -> Result<Resolution> {
        let started = Instant::now();
        log_op_start!(
            OP_RESOLVE,
            request_id = %ctx.request_id,
            resource_type = resource_type,
            identifier = identifier
        );

        let result = self.run(resource_type, identifier).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(resolution) => {
                log_op_end!(
                    OP_RESOLVE,
                    duration_ms = duration_ms,
                    request_id = %ctx.request_id,
                    identifier = identifier,
                    canonical_key = %resolution.canonical_key,
                    via = resolution.via.as_str()
                );
                Ok(resolution)
            }
            Err(err) => {
                let mut err = err.with_request_id(ctx.request_id.clone());
                if let Some(trace_id) = &ctx.trace_id {
                    err = err.with_trace_id(trace_id.clone());
                }
                log_op_error!(
                    OP_RESOLVE,
                    &err,
                    duration_ms = duration_ms,
                    request_id = %ctx.request_id,
                    identifier = identifier
                );
                Err(err)
            }
        }
    }

    /// Run only the fallback scan, bypassing the probe.
    ///
    /// A repair/diagnostic path; page rendering goes through `resolve`.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the listing fails
    /// - `AmbiguousMatch` under the `reject` policy
    pub async fn scan_only(
        &self,
        resource_type: &str,
        identifier: &str,
    ) -> Result<Option<ScanMatch>> {
        scan(
            self.store.as_ref(),
            resource_type,
            identifier,
            classify(identifier),
            self.policy,
        )
        .await
    }

    async fn run(&self, resource_type: &str, identifier: &str) -> Result<Resolution> {
        let mut state = ResolveState::Start;
        loop {
            state = match state.terminal() {
                Ok(outcome) => return outcome,
                Err(pending) => self.step(pending, resource_type, identifier).await,
            };
            tracing::debug!(
                component = module_path!(),
                op = OP_RESOLVE,
                event = EVENT_TRANSITION,
                state = state.name(),
                resource_type = resource_type,
                identifier = identifier
            );
        }
    }

    async fn step(
        &self,
        state: ResolveState,
        resource_type: &str,
        identifier: &str,
    ) -> ResolveState {
        match state {
            ResolveState::Start => ResolveState::Classified {
                class: classify(identifier),
            },

            ResolveState::Classified { class } => {
                if identifier.trim().is_empty() {
                    return ResolveState::NotFound(
                        ResolveError::EmptyIdentifier {
                            resource_type: resource_type.to_string(),
                        }
                        .into(),
                    );
                }
                let candidates = generate_candidates(resource_type, identifier, class);
                tracing::debug!(
                    op = OP_RESOLVE,
                    identifier_class = class.as_str(),
                    candidate_count = candidates.len()
                );
                match probe(
                    self.store.as_ref(),
                    resource_type,
                    identifier,
                    &candidates,
                    self.policy,
                )
                .await
                {
                    Ok(Some(hit)) => ResolveState::Resolved(from_probe(hit, class)),
                    Ok(None) if class.allows_scan() && self.fallback_scan => {
                        ResolveState::Probed { class }
                    }
                    Ok(None) => ResolveState::NotFound(not_found(resource_type, identifier)),
                    Err(err) => failed(err),
                }
            }

            ResolveState::Probed { class } => {
                match scan(
                    self.store.as_ref(),
                    resource_type,
                    identifier,
                    class,
                    self.policy,
                )
                .await
                {
                    Ok(found) => ResolveState::Scanned { class, found },
                    Err(err) => failed(err),
                }
            }

            ResolveState::Scanned {
                class,
                found: Some(m),
            } => ResolveState::Resolved(Resolution {
                canonical_key: m.key,
                class,
                via: ResolvedVia::Scan {
                    rule: m.rule,
                    scanned: m.scanned,
                },
                document: None,
            }),

            ResolveState::Scanned { found: None, .. } => {
                ResolveState::NotFound(not_found(resource_type, identifier))
            }

            terminal => terminal,
        }
    }
}

fn from_probe(hit: ProbeHit, class: IdentifierClass) -> Resolution {
    Resolution {
        canonical_key: hit.key,
        class,
        via: ResolvedVia::Probe {
            candidate_index: hit.candidate_index,
        },
        document: Some(hit.document),
    }
}

fn not_found(resource_type: &str, identifier: &str) -> ExError {
    ResolveError::NoSuchResource {
        resource_type: resource_type.to_string(),
        identifier: identifier.to_string(),
    }
    .into()
}

fn failed(err: ExError) -> ResolveState {
    match err.kind() {
        ExErrorKind::AmbiguousMatch => ResolveState::Rejected(err),
        ExErrorKind::StoreUnavailable => ResolveState::StoreError(err),
        _ => ResolveState::StoreError(
            ExError::from(ResolveError::StoreFailed {
                stage: OP_RESOLVE.to_string(),
                reason: err.message().to_string(),
            })
            .with_source(err),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubid_store::MemoryStore;

    fn resolver(docs: &[&str]) -> (Resolver, MemoryStore) {
        let store =
            MemoryStore::with_documents(docs.iter().map(|k| Document::new("event", *k)));
        (Resolver::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn test_opaque_hit_resolves_directly() {
        let (r, store) = resolver(&["drafts.event.abc12345"]);
        let res = r.resolve("event", "drafts.event.abc12345").await.unwrap();

        assert_eq!(res.class, IdentifierClass::Opaque);
        assert_eq!(res.via, ResolvedVia::Probe { candidate_index: 0 });
        assert_eq!(store.get_calls(), 1);
    }

    #[tokio::test]
    async fn test_opaque_miss_never_scans() {
        let (r, store) = resolver(&["event.abc12345"]);
        let err = r.resolve("event", "event.abc1234").await.unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(store.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_identifier_touches_nothing() {
        let (r, store) = resolver(&["event.abc12345"]);
        let err = r.resolve("event", "").await.unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(store.get_calls() + store.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_scan_disabled_short_miss_is_not_found() {
        let (r, store) = resolver(&["event.abc12345xyz"]);
        let r = r.with_fallback_scan(false);
        let err = r.resolve("event", "abc12345").await.unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(store.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_scan_failure_is_store_error() {
        let (r, store) = resolver(&["event.other"]);
        store.fail_list(true);
        let err = r.resolve("event", "abc12345").await.unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_request_id_attached_to_errors() {
        let (r, _store) = resolver(&[]);
        let ctx = RequestContext::new();
        let err = r
            .resolve_with_context(&ctx, "event", "zzzzzzzz")
            .await
            .unwrap_err();

        assert_eq!(err.request_id(), Some(&ctx.request_id));
    }
}
