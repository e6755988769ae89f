//! Seed importer orchestration
//!
//! Parses a seed and upserts every document in one transaction, then records
//! the import in `seed_imports`.

use crate::errors::{from_rusqlite, Result};
use crate::seed::{compute_seed_digest, parse_seed_file, parse_seed_str, SeedV0};
use crate::sqlite::{upsert_document, SqliteStore};
use rusqlite::Connection;
use std::path::Path;

/// Outcome of a seed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub seed_digest: String,
    pub document_count: usize,
}

/// Import a seed file into the store
///
/// # Errors
///
/// - `Io` / `InvalidInput` from parsing
/// - `Persistence` if the transaction fails; nothing is written in that case
pub fn import_seed(store: &SqliteStore, path: &Path) -> Result<ImportReport> {
    let seed = parse_seed_file(path)?;
    let source = path.display().to_string();
    store.with_connection(|conn| import_into(conn, &seed, &source))
}

/// Import a seed held in memory
///
/// # Errors
///
/// Same as [`import_seed`].
pub fn import_seed_str(store: &SqliteStore, content: &str, source: &str) -> Result<ImportReport> {
    let seed = parse_seed_str(content)?;
    store.with_connection(|conn| import_into(conn, &seed, source))
}

fn import_into(conn: &mut Connection, seed: &SeedV0, source: &str) -> Result<ImportReport> {
    let seed_digest = compute_seed_digest(seed)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;

    for seed_doc in &seed.documents {
        upsert_document(&tx, &seed_doc.to_document())?;
    }

    tx.execute(
        "INSERT INTO seed_imports (seed_digest, source_path, document_count, imported_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (seed_digest) DO UPDATE SET imported_at = excluded.imported_at",
        rusqlite::params![
            seed_digest,
            source,
            seed.documents.len() as i64,
            chrono::Utc::now().timestamp()
        ],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(
        op = "seed_import",
        source = source,
        seed_digest = %seed_digest,
        document_count = seed.documents.len(),
        "imported seed"
    );

    Ok(ImportReport {
        seed_digest,
        document_count: seed.documents.len(),
    })
}
