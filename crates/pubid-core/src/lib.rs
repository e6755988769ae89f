//! pubid Core - public identifier kernel
//!
//! This crate holds the pure, I/O-free half of public identifier resolution:
//! - Short code derivation shared by link rendering and matching
//! - Identifier classification (UUID / short code / opaque key)
//! - Probe candidate generation
//! - Fallback scan heuristics over a key listing
//! - Ambiguity policy for multi-hit tie-breaks
//! - Document model, resolver configuration, error and logging facilities
//!
//! Store access and orchestration live in `pubid-store` and `pubid-engine`.

pub mod candidate_resolver;
pub mod candidates;
pub mod classify;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod scan;
pub mod short_code;

#[doc(hidden)]
pub use pubid_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use candidate_resolver::AmbiguityPolicy;
pub use candidates::generate_candidates;
pub use classify::{classify, IdentifierClass};
pub use config::ResolverConfig;
pub use errors::{ExError, ExErrorKind, ResolveError, Result};
pub use model::{Document, DocumentKey, Variant, DRAFT_PREFIX};
pub use scan::{MatchRule, ScanMatch};
pub use short_code::{short_code, short_link, SHORT_CODE_LEN};
