//! Structured error facility for the reconciliation engine.
//!
//! The engine degrades gracefully on most malformed input (empty logs,
//! unknown operations, missing content are never errors). The error paths
//! that remain are genuinely fatal for a reconciliation: a shape change
//! mid-sequence, an unreadable log, or a serialization failure.

/// Result type alias using [`TraceError`].
pub type Result<T> = std::result::Result<T, TraceError>;

/// Canonical error kind taxonomy.
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceErrorKind {
    /// An entity's content changed family shape mid-log (e.g. array-shaped
    /// then tree-shaped). Unmodeled upstream; the engine fails loudly
    /// rather than silently reinterpreting.
    InconsistentShape,
    /// Content was required but absent (internal misuse; event-level
    /// missing content is skipped, not an error).
    MissingContent,
    /// The raw log could not be understood as a sequence of trace events.
    InvalidLog,
    /// JSON (de)serialization failure.
    Serialization,
    /// Filesystem I/O failure (CLI log loading).
    Io,
    /// Invariant breakage inside the engine itself.
    Internal,
}

impl TraceErrorKind {
    /// Get the stable error code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            TraceErrorKind::InconsistentShape => "ERR_INCONSISTENT_SHAPE",
            TraceErrorKind::MissingContent => "ERR_MISSING_CONTENT",
            TraceErrorKind::InvalidLog => "ERR_INVALID_LOG",
            TraceErrorKind::Serialization => "ERR_SERIALIZATION",
            TraceErrorKind::Io => "ERR_IO",
            TraceErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type.
///
/// Carries classification plus operation and entity context for debugging.
/// Built incrementally with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct TraceError {
    kind: TraceErrorKind,
    op: Option<String>,
    entity: Option<String>,
    message: String,
}

impl TraceError {
    /// Create a new error with the specified kind.
    pub fn new(kind: TraceErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            message: String::new(),
        }
    }

    /// Add operation context.
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity-name context.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add custom message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> TraceErrorKind {
        self.kind
    }

    /// Get the stable error code.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any.
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity-name context, if any.
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        Ok(())
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
