//! Seed import system
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML/JSON parser with validation
//! - Digest canonicalization
//! - Importer writing into the SQLite store

pub mod digest;
pub mod format_v0;
pub mod importer;
pub mod parser;

pub use digest::compute_seed_digest;
pub use format_v0::{SeedDocument, SeedV0};
pub use importer::{import_seed, import_seed_str, ImportReport};
pub use parser::{parse_seed_file, parse_seed_str};
