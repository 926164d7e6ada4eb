//! Timeline merger: one global chronological ordering across entities.
//!
//! Used by multi-entity comparison rendering. Columns are the significant
//! timestamps (timestamps at which any entity has a retained snapshot);
//! each entity contributes a cell at the marks where it has a snapshot of
//! its own. [`cell_at`] answers point queries at arbitrary marks, carrying
//! the last-known state forward for scrubbing consumers.

use crate::model::event::Timestamp;
use crate::model::snapshot::EntitySequence;
use crate::reconcile::Reconciliation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One entity's state at one significant timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineCell {
    /// Step number of the snapshot selected for this mark.
    pub step_number: u32,
    /// True when the snapshot did not occur exactly at this mark and its
    /// last-known state was carried forward instead.
    pub carried_forward: bool,
}

/// One entity's row across all significant timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// Entity this row belongs to.
    pub entity_name: String,
    /// One slot per significant timestamp; `None` where the entity is not
    /// scheduled to appear at that mark.
    pub cells: Vec<Option<TimelineCell>>,
}

/// The merged cross-entity timeline.
///
/// Guarantee: every row has at least one cell. Each entity carries at
/// least one retained snapshot, and its snapshot timestamps are members
/// of the significant-timestamp union by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTimeline {
    /// Significant timestamps, ascending.
    pub timestamps: Vec<Timestamp>,
    /// One row per entity, in entity-name order.
    pub rows: Vec<TimelineRow>,
}

/// Select the snapshot representing `sequence` at an arbitrary `mark`.
///
/// Exact timestamp match first, else the latest snapshot at or before the
/// mark, else the first snapshot as a last resort; the latter two are
/// carried forward. The merge only queries an entity at its own marks, so
/// merged cells always come from the exact-match arm.
pub fn cell_at(sequence: &EntitySequence, mark: Timestamp) -> Option<TimelineCell> {
    if let Some(snapshot) = sequence.snapshots.iter().find(|s| s.timestamp == mark) {
        return Some(TimelineCell {
            step_number: snapshot.step_number,
            carried_forward: false,
        });
    }
    if let Some(snapshot) = sequence
        .snapshots
        .iter()
        .filter(|s| s.timestamp <= mark)
        .last()
    {
        return Some(TimelineCell {
            step_number: snapshot.step_number,
            carried_forward: true,
        });
    }
    sequence.snapshots.first().map(|snapshot| TimelineCell {
        step_number: snapshot.step_number,
        carried_forward: true,
    })
}

/// Merge a reconciliation into one cross-entity timeline.
pub fn merge_timeline(reconciliation: &Reconciliation) -> MergedTimeline {
    // Distinct timestamps at which any entity retained a snapshot.
    let marks: BTreeSet<Timestamp> = reconciliation
        .entities
        .values()
        .flat_map(|seq| seq.snapshots.iter().map(|s| s.timestamp))
        .collect();
    let timestamps: Vec<Timestamp> = marks.into_iter().collect();

    let mut rows = Vec::with_capacity(reconciliation.entities.len());
    for (name, sequence) in &reconciliation.entities {
        // An entity appears at the marks where it has a snapshot of its own.
        let own_marks: BTreeSet<Timestamp> =
            sequence.snapshots.iter().map(|s| s.timestamp).collect();
        let cells: Vec<Option<TimelineCell>> = timestamps
            .iter()
            .map(|mark| {
                if own_marks.contains(mark) {
                    cell_at(sequence, *mark)
                } else {
                    None
                }
            })
            .collect();

        rows.push(TimelineRow {
            entity_name: name.clone(),
            cells,
        });
    }

    MergedTimeline { timestamps, rows }
}
