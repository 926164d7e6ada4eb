//! Edit-kind classification for noise suppression.
//!
//! The tree noise filter needs to tell deliberate edits of an already-built
//! structure apart from transient mid-construction snapshots. The only
//! signal available from the tracer is the source text of the triggering
//! statement, so the default classifier is a substring heuristic: fragile
//! by nature, and therefore kept behind a trait so it can be swapped for an
//! exact classifier if the instrumentation ever carries explicit edit-kind
//! tags.

use crate::model::event::{Operation, TraceEvent};

/// What kind of edit an observation's triggering statement represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// A node's scalar value was reassigned.
    ValueAssignment,
    /// A child link was cleared (set to empty).
    LinkCleared,
    /// A child link was pointed at a freshly-constructed node.
    LinkToNewNode,
    /// Nothing recognizable; treated as construction noise by the filter.
    Unknown,
}

impl EditKind {
    /// True for edits of an already-built structure. Modification-flagged
    /// observations are always retained regardless of node-count trend.
    pub fn is_modification(&self) -> bool {
        !matches!(self, EditKind::Unknown)
    }
}

/// Classifies one observation's edit kind.
///
/// Injectable so callers can replace the substring heuristic.
pub trait EditClassifier {
    /// Classify the edit represented by `event`.
    fn classify(&self, event: &TraceEvent) -> EditKind;
}

/// Default substring-based classifier.
///
/// Derived from the statement patterns the tracer itself recognizes:
/// `.value = ...` style scalar assignments, links cleared with `None`/`null`,
/// and links assigned a constructor call.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl EditClassifier for HeuristicClassifier {
    fn classify(&self, event: &TraceEvent) -> EditKind {
        // Explicit edit operations need no text sniffing.
        match &event.operation {
            Operation::Assign => return EditKind::ValueAssignment,
            Operation::StructuralEdit => return EditKind::LinkToNewNode,
            _ => {}
        }

        let code = match event.statement() {
            Some(code) => code,
            None => return EditKind::Unknown,
        };

        if code.contains(".value =") || code.contains(".val =") || code.contains(".data =") {
            return EditKind::ValueAssignment;
        }
        if code.contains("= None") || code.contains("= null") {
            return EditKind::LinkCleared;
        }
        let assigns_link =
            code.contains(".left =") || code.contains(".right =") || code.contains(".children[");
        if assigns_link && code.contains('(') {
            return EditKind::LinkToNewNode;
        }
        EditKind::Unknown
    }
}
