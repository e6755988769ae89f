//! The read-only document store seam.
//!
//! The resolver issues only these two reads. Neither pushes filtering down
//! beyond the resource type.

use async_trait::async_trait;
use pubid_core::model::{Document, DocumentKey};

use crate::errors::Result;

/// Read-only access to typed documents.
///
/// A lookup that finds nothing is `Ok(None)`; `Err` is reserved for
/// transport or backend failure so callers can tell absence from outage.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document of `doc_type` whose canonical key is exactly `key`.
    ///
    /// # Errors
    ///
    /// Backend failure (`Persistence`, `Io`, ...); never for absence.
    async fn get_by_key(&self, doc_type: &str, key: &str) -> Result<Option<Document>>;

    /// List every key of `doc_type` in a stable order.
    ///
    /// # Errors
    ///
    /// Backend failure.
    async fn list_keys(&self, doc_type: &str) -> Result<Vec<DocumentKey>>;
}
