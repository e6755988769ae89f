use pubid_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code. Callers (page renderers, the CLI)
/// branch on the kind: `NotFound` is a 404, `StoreUnavailable` is a 5xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Resolution
    NotFound,
    AmbiguousMatch,
    StoreUnavailable,

    // Input/configuration
    InvalidInput,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AmbiguousMatch => "ERR_AMBIGUOUS_MATCH",
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging. Built with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    resource_type: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            resource_type: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add resource type context
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Add entity context (an external identifier or a canonical key)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add the canonical keys that competed for an ambiguous match
    pub fn with_candidates(mut self, keys: Vec<String>) -> Self {
        self.candidates = Some(keys);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Get competing candidate keys, if any (populated on AmbiguousMatch)
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }

    /// True when the error means "no such resource"
    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }

    /// True when the error means the backend could not be reached
    pub fn is_store_unavailable(&self) -> bool {
        self.kind == ExErrorKind::StoreUnavailable
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(resource_type) = &self.resource_type {
            write!(f, " (resource_type: {})", resource_type)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised while resolving a public identifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The identifier was empty or whitespace only
    #[error("Empty identifier for resource type {resource_type}")]
    EmptyIdentifier { resource_type: String },

    /// Probe and scan (where applicable) found nothing
    #[error("No {resource_type} matches identifier {identifier}")]
    NoSuchResource {
        resource_type: String,
        identifier: String,
    },

    /// The document store failed and no answer could be trusted
    #[error("Document store failed during {stage}: {reason}")]
    StoreFailed { stage: String, reason: String },

    /// More than one logical record matched under the `reject` policy
    #[error("Identifier {identifier} matches {} distinct records", candidates.len())]
    AmbiguousCandidates {
        identifier: String,
        candidates: Vec<String>,
    },

    /// A seed file failed validation
    #[error("Invalid seed: {reason}")]
    InvalidSeed { reason: String },

    /// Configuration could not be parsed or read
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<ResolveError> for ExError {
    fn from(err: ResolveError) -> Self {
        let message = err.to_string();
        match err {
            ResolveError::EmptyIdentifier { resource_type } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("resolve")
                    .with_resource_type(resource_type)
                    .with_message(message)
            }
            ResolveError::NoSuchResource {
                resource_type,
                identifier,
            } => ExError::new(ExErrorKind::NotFound)
                .with_op("resolve")
                .with_resource_type(resource_type)
                .with_entity_id(identifier)
                .with_message(message),
            ResolveError::StoreFailed { stage, .. } => ExError::new(ExErrorKind::StoreUnavailable)
                .with_op(stage)
                .with_message(message),
            ResolveError::AmbiguousCandidates {
                identifier,
                candidates,
            } => ExError::new(ExErrorKind::AmbiguousMatch)
                .with_op("resolve")
                .with_entity_id(identifier)
                .with_candidates(candidates)
                .with_message(message),
            ResolveError::InvalidSeed { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("seed_parse")
                .with_message(message),
            ResolveError::InvalidConfig { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("config_load")
                .with_message(message),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
