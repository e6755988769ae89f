//! Document model
//!
//! A resource record is addressed by `(doc_type, key)`. The same logical
//! record may be stored twice: once under its published key and once under
//! the draft key `drafts.<published key>`.

use serde::{Deserialize, Serialize};

/// Literal marker prefixed to the key of a draft variant
pub const DRAFT_PREFIX: &str = "drafts.";

/// A stored resource record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Resource type, e.g. `event` or `listing`
    pub doc_type: String,
    /// Canonical key, unique within `doc_type`
    pub key: String,
    /// Opaque document body; the resolver never inspects it
    #[serde(default = "empty_fields")]
    pub fields: serde_json::Value,
}

fn empty_fields() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Document {
    /// Create a document with an empty body
    pub fn new(doc_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            key: key.into(),
            fields: empty_fields(),
        }
    }

    /// Replace the document body
    pub fn with_fields(mut self, fields: serde_json::Value) -> Self {
        self.fields = fields;
        self
    }

    pub fn variant(&self) -> Variant {
        Variant::of(&self.key)
    }
}

/// Key-only projection returned by a full listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentKey {
    pub key: String,
}

impl DocumentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl From<&Document> for DocumentKey {
    fn from(doc: &Document) -> Self {
        Self::new(doc.key.clone())
    }
}

/// Which variant of a logical record a key addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Published,
    Draft,
}

impl Variant {
    /// Derive the variant from a canonical key
    pub fn of(key: &str) -> Self {
        if key.starts_with(DRAFT_PREFIX) {
            Variant::Draft
        } else {
            Variant::Published
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Published => "published",
            Variant::Draft => "draft",
        }
    }
}

/// Strip a single leading draft marker, yielding the published key
pub fn published_key(key: &str) -> &str {
    key.strip_prefix(DRAFT_PREFIX).unwrap_or(key)
}

/// Two keys address the same logical record iff their published keys match
pub fn same_logical_record(a: &str, b: &str) -> bool {
    published_key(a) == published_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_key() {
        assert_eq!(Variant::of("event.abc"), Variant::Published);
        assert_eq!(Variant::of("drafts.event.abc"), Variant::Draft);
        // Marker must be a prefix, not merely present.
        assert_eq!(Variant::of("event.drafts.abc"), Variant::Published);
    }

    #[test]
    fn test_published_key_strips_once() {
        assert_eq!(published_key("drafts.event.abc"), "event.abc");
        assert_eq!(published_key("drafts.drafts.x"), "drafts.x");
        assert_eq!(published_key("event.abc"), "event.abc");
    }

    #[test]
    fn test_same_logical_record() {
        assert!(same_logical_record("event.abc", "drafts.event.abc"));
        assert!(!same_logical_record("event.abc", "abc"));
    }

    #[test]
    fn test_document_defaults_to_empty_object() {
        let doc: Document =
            serde_json::from_str(r#"{"doc_type":"event","key":"event.a"}"#).unwrap();
        assert_eq!(doc.fields, serde_json::json!({}));
        assert_eq!(doc.variant(), Variant::Published);
    }
}
