//! pubid Engine - public identifier resolution
//!
//! Sequences classification, parallel probing and the fallback scan over a
//! [`pubid_store::DocumentStore`], returning a canonical key, a not-found
//! condition, or a store failure.

pub mod prober;
pub mod resolver;
pub mod scanner;

pub use prober::{probe, ProbeHit};
pub use resolver::{Resolution, ResolveState, ResolvedVia, Resolver};
pub use scanner::scan;
