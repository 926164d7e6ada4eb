//! Raw trace event model.
//!
//! One [`TraceEvent`] per observation emitted by the instrumentation
//! collaborator. Events are immutable input; the engine never mutates them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering key for observations.
///
/// The producing tracer emits epoch floats (`time.time()`), which need not
/// be unique. Wrapped so the engine can treat them as totally ordered via
/// `f64::total_cmp` without scattering float comparisons around.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub f64);

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Timestamp {
    fn from(value: f64) -> Self {
        Timestamp(value)
    }
}

/// Operation tag attached to an observation.
///
/// Open vocabulary: the tracer's statement classifier emits many more
/// strings than the engine models (`set_left_child`, `add_edge`, ...).
/// Unknown values are preserved verbatim in [`Operation::Other`] and pass
/// through the differs generically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Function-entry bookkeeping marker (filtered out).
    InternalCall,
    /// Function-exit bookkeeping marker (filtered out).
    InternalReturn,
    /// Element appended to the end of a sequence.
    Append,
    /// Element inserted at a position.
    Insert,
    /// Element removed by value.
    Remove,
    /// Element popped from the end.
    Pop,
    /// Direct value assignment.
    Assign,
    /// Structural edit of an already-built structure.
    StructuralEdit,
    /// Explicit end-of-execution state marker. Always trusted.
    FinalState,
    /// Any operation string the engine does not model.
    Other(String),
}

impl Operation {
    /// Wire name of this operation.
    pub fn as_str(&self) -> &str {
        match self {
            Operation::InternalCall => "call",
            Operation::InternalReturn => "exit",
            Operation::Append => "append",
            Operation::Insert => "insert",
            Operation::Remove => "remove",
            Operation::Pop => "pop",
            Operation::Assign => "assign",
            Operation::StructuralEdit => "structural_edit",
            Operation::FinalState => "final_state",
            Operation::Other(s) => s,
        }
    }

    /// True for internal call/return bookkeeping markers.
    pub fn is_internal(&self) -> bool {
        matches!(self, Operation::InternalCall | Operation::InternalReturn)
    }

    /// True for the explicit final-state marker.
    pub fn is_final_state(&self) -> bool {
        matches!(self, Operation::FinalState)
    }

    /// True for remove-by-value or pop-from-end.
    pub fn is_removal(&self) -> bool {
        matches!(self, Operation::Remove | Operation::Pop)
    }
}

impl From<&str> for Operation {
    fn from(s: &str) -> Self {
        match s {
            "call" => Operation::InternalCall,
            "exit" | "return" => Operation::InternalReturn,
            "append" => Operation::Append,
            "insert" => Operation::Insert,
            "remove" => Operation::Remove,
            "pop" => Operation::Pop,
            "assign" => Operation::Assign,
            "structural_edit" => Operation::StructuralEdit,
            "final_state" => Operation::FinalState,
            other => Operation::Other(other.to_string()),
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Operation::from(s.as_str()))
    }
}

/// Free-form detail about the triggering statement.
///
/// `code` holds the source text of the statement that caused the
/// observation. Carried through unmodified for display; also consulted by
/// the noise-suppression heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDetail {
    /// Source text of the triggering statement.
    pub code: String,
}

/// One raw observation of a named value at a point in program execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Identifier of the observed variable/object.
    pub name: String,
    /// Operation that produced this observation.
    pub operation: Operation,
    /// Snapshot value at the time of observation, if the tracer captured one.
    /// Family-shaped; validated against the invoked family at reconcile time.
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    /// Chronological ordering key (need not be unique).
    pub timestamp: Timestamp,
    /// Source location, carried through unmodified for display.
    #[serde(default)]
    pub location: Option<String>,
    /// Triggering-statement detail, carried through unmodified.
    #[serde(default)]
    pub operation_details: Option<OperationDetail>,
}

impl TraceEvent {
    /// Source text of the triggering statement, if recorded.
    pub fn statement(&self) -> Option<&str> {
        self.operation_details.as_ref().map(|d| d.code.as_str())
    }
}
