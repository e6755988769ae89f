//! pubid Store - read-only document store access
//!
//! Provides:
//! - The `DocumentStore` seam consumed by the resolver (keyed get, key listing)
//! - An instrumented in-memory store with fault injection
//! - A SQLite store with embedded, checksummed migrations
//! - Seed file parsing and import for populating the SQLite store

pub mod db;
pub mod document_store;
pub mod errors;
pub mod memory;
pub mod migrations;
pub mod seed;
pub mod sqlite;

// Re-export key types
pub use document_store::DocumentStore;
pub use errors::Result;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
