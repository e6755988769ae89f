//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the resolver's
//! log boundaries and the assertions made against them in tests.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Resolution context
pub const FIELD_RESOURCE_TYPE: &str = "resource_type";
pub const FIELD_IDENTIFIER: &str = "identifier";
pub const FIELD_IDENTIFIER_CLASS: &str = "identifier_class";
pub const FIELD_CANDIDATE: &str = "candidate";
pub const FIELD_CANONICAL_KEY: &str = "canonical_key";
pub const FIELD_RULE: &str = "rule";
pub const FIELD_STATE: &str = "state";

// Collection sizes
pub const FIELD_CANDIDATE_COUNT: &str = "candidate_count";
pub const FIELD_SCANNED_COUNT: &str = "scanned_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_TRANSITION: &str = "transition";
