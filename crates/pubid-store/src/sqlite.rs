//! SQLite-backed document store
//!
//! One `documents` table; `list_keys` reports keys in insertion (`seq`)
//! order so scans are deterministic across runs.
//!
//! Queries run inline on the calling task while holding a `std::sync::Mutex`.
//! A resolve issues at most three lookups and one listing, so they are not
//! moved to `spawn_blocking`; a store shared across many concurrent requests
//! would need that.

use async_trait::async_trait;
use pubid_core::errors::{ExError, ExErrorKind};
use pubid_core::model::{Document, DocumentKey};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::document_store::DocumentStore;
use crate::errors::{from_rusqlite, store_unavailable, Result};
use crate::{db, migrations};

/// Document store over a single serialized SQLite connection.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and apply pending migrations.
    ///
    /// # Errors
    ///
    /// - `Io` if the parent directory cannot be created
    /// - `Persistence` if SQLite or a migration fails
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    /// Open an existing, already migrated database file read-only.
    ///
    /// Used by the resolve path, which never writes. Nothing is created on disk.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the file is missing, cannot be opened, or has
    ///   no `documents` table
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = db::open_existing(path)?;
        let initialised: bool = conn
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'documents')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| store_unavailable("db_open", format!("{}: {}", path.display(), e)))?;
        if !initialised {
            return Err(store_unavailable(
                "db_open",
                format!("{} is not an initialised document store", path.display()),
            ));
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a migrated in-memory database.
    ///
    /// # Errors
    ///
    /// - `Persistence` if SQLite or a migration fails
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection, applying pending migrations.
    ///
    /// # Errors
    ///
    /// - `Persistence` if a migration fails
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        migrations::apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert or replace a document.
    ///
    /// # Errors
    ///
    /// - `Serialization` if the body cannot be encoded
    /// - `Persistence` if the write fails
    pub fn upsert(&self, doc: &Document) -> Result<()> {
        let conn = self.lock("upsert")?;
        upsert_document(&conn, doc)
    }

    /// Run `f` with exclusive access to the connection (seed import, tooling).
    ///
    /// # Errors
    ///
    /// Whatever `f` returns, or `Internal` if the lock is poisoned.
    pub fn with_connection<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.lock("with_connection")?;
        f(&mut conn)
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op(op.to_string())
                .with_message("sqlite connection lock poisoned")
        })
    }
}

/// Upsert within an existing connection or transaction.
///
/// `seq` is kept on conflict, so a replaced document keeps its listing position.
pub(crate) fn upsert_document(conn: &Connection, doc: &Document) -> Result<()> {
    let payload = serde_json::to_string(&doc.fields)?;
    let now = chrono::Utc::now().timestamp_millis();
    conn.execute(
        "INSERT INTO documents (doc_type, doc_id, payload_json, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (doc_type, doc_id)
         DO UPDATE SET payload_json = excluded.payload_json, updated_at = excluded.updated_at",
        rusqlite::params![doc.doc_type, doc.key, payload, now],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get_by_key(&self, doc_type: &str, key: &str) -> Result<Option<Document>> {
        let conn = self.lock("get_by_key")?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload_json FROM documents WHERE doc_type = ?1 AND doc_id = ?2",
                [doc_type, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        payload
            .map(|p| -> Result<Document> {
                let fields: serde_json::Value = serde_json::from_str(&p).map_err(|e| {
                    ExError::new(ExErrorKind::Serialization)
                        .with_op("get_by_key")
                        .with_entity_id(key)
                        .with_message(format!("Invalid payload JSON: {}", e))
                })?;
                Ok(Document::new(doc_type, key).with_fields(fields))
            })
            .transpose()
    }

    async fn list_keys(&self, doc_type: &str) -> Result<Vec<DocumentKey>> {
        let conn = self.lock("list_keys")?;
        let mut stmt = conn
            .prepare("SELECT doc_id FROM documents WHERE doc_type = ?1 ORDER BY seq")
            .map_err(from_rusqlite)?;
        let keys = stmt
            .query_map([doc_type], |row| row.get::<_, String>(0))
            .map_err(from_rusqlite)?
            .map(|r| r.map(DocumentKey::new))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_then_get() {
        let store = SqliteStore::open_in_memory().unwrap();
        let doc = Document::new("event", "event.abc12345")
            .with_fields(serde_json::json!({"eventName": "Night ride"}));
        store.upsert(&doc).unwrap();

        let fetched = store.get_by_key("event", "event.abc12345").await.unwrap();
        assert_eq!(fetched, Some(doc));
        assert!(store
            .get_by_key("service", "event.abc12345")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_keys_in_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for key in ["event.b", "event.a", "event.c"] {
            store.upsert(&Document::new("event", key)).unwrap();
        }
        store.upsert(&Document::new("event", "event.b")).unwrap();

        let keys: Vec<String> = store
            .list_keys("event")
            .await
            .unwrap()
            .into_iter()
            .map(|k| k.key)
            .collect();
        assert_eq!(keys, vec!["event.b", "event.a", "event.c"]);
    }
}
