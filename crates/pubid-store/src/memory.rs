//! In-memory document store
//!
//! Documents are kept per type in insertion order, which is the order
//! `list_keys` reports. The store counts every call and can be told to fail,
//! so tests can check probe-before-scan and outage handling.
//!
//! # Example
//!
//! ```
//! use pubid_store::{DocumentStore, MemoryStore};
//! use pubid_core::Document;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! store.insert(Document::new("event", "event.abc12345"));
//!
//! let doc = store.get_by_key("event", "event.abc12345").await.unwrap();
//! assert!(doc.is_some());
//! assert_eq!(store.get_calls(), 1);
//! # });
//! ```

use async_trait::async_trait;
use pubid_core::errors::{ExError, ExErrorKind};
use pubid_core::model::{Document, DocumentKey};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::document_store::DocumentStore;
use crate::errors::{backend_unavailable, Result};

/// In-memory store, shared across clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    /// Documents by type, in insertion order.
    docs: HashMap<String, Vec<Document>>,
    /// Call counters.
    get_calls: usize,
    list_calls: usize,
    /// Fault injection.
    fail_all: bool,
    fail_list: bool,
    fail_keys: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `docs`, inserted in order.
    pub fn with_documents(docs: impl IntoIterator<Item = Document>) -> Self {
        let store = Self::new();
        for doc in docs {
            store.insert(doc);
        }
        store
    }

    /// Insert or replace a document, keeping its original position on replace.
    pub fn insert(&self, doc: Document) {
        if let Ok(mut inner) = self.inner.lock() {
            let bucket = inner.docs.entry(doc.doc_type.clone()).or_default();
            match bucket.iter_mut().find(|d| d.key == doc.key) {
                Some(existing) => *existing = doc,
                None => bucket.push(doc),
            }
        }
    }

    /// Make every call fail as if the backend were unreachable.
    pub fn fail_all(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_all = fail;
        }
    }

    /// Make `list_keys` fail.
    pub fn fail_list(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_list = fail;
        }
    }

    /// Make `get_by_key` fail for one key.
    pub fn fail_key(&self, key: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_keys.insert(key.into());
        }
    }

    /// Number of `get_by_key` calls so far.
    pub fn get_calls(&self) -> usize {
        self.inner.lock().map(|i| i.get_calls).unwrap_or(0)
    }

    /// Number of `list_keys` calls so far.
    pub fn list_calls(&self) -> usize {
        self.inner.lock().map(|i| i.list_calls).unwrap_or(0)
    }

    pub fn reset_counters(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.get_calls = 0;
            inner.list_calls = 0;
        }
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, MemoryStoreInner>> {
        self.inner.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op(op.to_string())
                .with_message("memory store lock poisoned")
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_by_key(&self, doc_type: &str, key: &str) -> Result<Option<Document>> {
        let mut inner = self.lock("get_by_key")?;
        inner.get_calls += 1;

        if inner.fail_all || inner.fail_keys.contains(key) {
            return Err(backend_unavailable("get_by_key", "injected failure"));
        }

        Ok(inner
            .docs
            .get(doc_type)
            .and_then(|bucket| bucket.iter().find(|d| d.key == key))
            .cloned())
    }

    async fn list_keys(&self, doc_type: &str) -> Result<Vec<DocumentKey>> {
        let mut inner = self.lock("list_keys")?;
        inner.list_calls += 1;

        if inner.fail_all || inner.fail_list {
            return Err(backend_unavailable("list_keys", "injected failure"));
        }

        Ok(inner
            .docs
            .get(doc_type)
            .map(|bucket| bucket.iter().map(DocumentKey::from).collect())
            .unwrap_or_default())
    }
}
