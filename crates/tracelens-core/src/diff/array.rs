//! Array differ: index-addressed comparison of two ordered sequences.

use crate::diff::model::ArrayChanges;
use crate::model::event::Operation;
use serde_json::Value;

/// Compute the change set between the previous and current array snapshots.
///
/// Element-wise comparison over the overlap range, with length growth
/// reported as trailing `added` indices and shrinkage as trailing
/// `removed` indices. Operation-aware corrections re-express common edits
/// the way a reader perceives them:
///
/// - `append` forces the last index into `added` (not `modified`);
/// - `insert` at position 0 (detected from the triggering statement) marks
///   index 0 as `added` and clears `modified`, since an insert-at-front is a
///   shift, not element-wise modification;
/// - `remove`/`pop` marks the previous last index as `removed`.
pub fn diff_arrays(
    previous: &[Value],
    current: &[Value],
    operation: &Operation,
    statement: Option<&str>,
) -> ArrayChanges {
    let mut changes = ArrayChanges::default();

    let overlap = previous.len().min(current.len());
    for i in 0..overlap {
        if previous[i] != current[i] {
            changes.modified.insert(i);
        }
    }
    for i in previous.len()..current.len() {
        changes.added.insert(i);
    }
    for i in current.len()..previous.len() {
        changes.removed.insert(i);
    }

    match operation {
        Operation::Append if !current.is_empty() => {
            let last = current.len() - 1;
            changes.added.insert(last);
            changes.modified.remove(&last);
        }
        Operation::Insert => {
            let inserted_at_front = statement
                .map(|code| code.contains(".insert(0"))
                .unwrap_or(false);
            if inserted_at_front {
                changes.added.insert(0);
                changes.modified.clear();
            }
        }
        op if op.is_removal() && !previous.is_empty() => {
            changes.removed.insert(previous.len() - 1);
        }
        _ => {}
    }

    changes
}

/// All-added change set for the logically-first snapshot of a sequence.
pub fn initial_array_changes(current: &[Value]) -> ArrayChanges {
    let mut changes = ArrayChanges::default();
    for i in 0..current.len() {
        changes.added.insert(i);
    }
    changes
}
