//! Retained snapshot model.

use crate::diff::model::ChangeSet;
use crate::model::content::{StructureContent, StructureKind};
use crate::model::event::{Operation, Timestamp};
use serde::{Deserialize, Serialize};

/// A retained, deep-owned copy of an entity's content at one reconciled step.
///
/// Immutable once produced: the engine never patches a retained snapshot's
/// content in place. Every transformation produces a new owned copy; the
/// whole sequence is discarded wholesale and recomputed when a new raw log
/// arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the observed entity.
    pub entity_name: String,
    /// Deep-owned content at this step.
    pub content: StructureContent,
    /// Operation that produced the surviving observation.
    pub operation: Operation,
    /// Ordering key of the surviving observation.
    pub timestamp: Timestamp,
    /// 1-based, dense position within the reconciled sequence.
    pub step_number: u32,
    /// Source location, carried through for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Source text of the triggering statement, carried through for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// True when this is the entity's only retained snapshot, so the
    /// renderer knows not to expect a transition into it.
    #[serde(default)]
    pub singleton: bool,
    /// Structural diff against the previous snapshot of the same entity.
    /// The logically-first snapshot carries an all-added change set.
    pub changes: ChangeSet,
}

/// Ordered, per-entity sequence of retained snapshots.
///
/// Invariant: `snapshots` is strictly increasing in `step_number`
/// (`1..=N`, dense) and non-decreasing in `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySequence {
    /// Name of the entity this sequence belongs to.
    pub entity_name: String,
    /// Structure family, fixed for the lifetime of the sequence.
    pub kind: StructureKind,
    /// Retained snapshots in reconciled order.
    pub snapshots: Vec<Snapshot>,
}

impl EntitySequence {
    /// Timestamp of the last retained snapshot, if any.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.snapshots.last().map(|s| s.timestamp)
    }
}
