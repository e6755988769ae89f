//! Seed Format v0 schema
//!
//! ```yaml
//! schema_version: 0
//! documents:
//!   - type: event
//!     id: event.abc12345
//!     fields:
//!       eventName: Night ride
//!   - type: event
//!     id: drafts.event.xyz98765
//! ```

use pubid_core::model::Document;
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Documents to upsert, in listing order
    #[serde(default)]
    pub documents: Vec<SeedDocument>,
}

/// One document in a seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDocument {
    /// Resource type
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Canonical key, draft marker included for drafts
    pub id: String,

    /// Document body
    #[serde(default)]
    pub fields: Option<serde_json::Value>,
}

impl SeedDocument {
    pub fn to_document(&self) -> Document {
        let doc = Document::new(self.doc_type.clone(), self.id.clone());
        match &self.fields {
            Some(fields) => doc.with_fields(fields.clone()),
            None => doc,
        }
    }
}
