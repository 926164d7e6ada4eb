//! Human-readable summary renderer for reconciled sequences.

use crate::diff::model::ChangeSet;
use crate::model::snapshot::{EntitySequence, Snapshot};
use crate::reconcile::{Reconciliation, TreeReconciliation};

/// Render a human-readable Markdown summary of a [`Reconciliation`].
///
/// Informational only; the structured output is the JSON form.
pub fn render_reconciliation_summary(reconciliation: &Reconciliation) -> String {
    let mut out = String::new();
    out.push_str("## Reconciled Trace\n\n");
    out.push_str(&format!(
        "**Family**: {}  \n**Entities**: {}  \n**Snapshots**: {}\n\n",
        reconciliation.kind.as_str(),
        reconciliation.entities.len(),
        reconciliation.snapshot_count(),
    ));

    if reconciliation.entities.is_empty() {
        out.push_str("_No entities with usable content in this log._\n");
        return out;
    }

    for sequence in reconciliation.entities.values() {
        render_sequence(&mut out, sequence);
    }
    out
}

/// Render a human-readable Markdown summary of a tree reconciliation.
pub fn render_tree_summary(reconciliation: &TreeReconciliation) -> String {
    let mut out = String::new();
    out.push_str("## Reconciled Trace\n\n");
    out.push_str(&format!(
        "**Family**: tree  \n**Primary entity**: `{}`  \n**Snapshots**: {}\n\n",
        reconciliation.primary_entity,
        reconciliation.sequence.snapshots.len(),
    ));
    render_sequence(&mut out, &reconciliation.sequence);
    out
}

fn render_sequence(out: &mut String, sequence: &EntitySequence) {
    out.push_str(&format!("### `{}`\n\n", sequence.entity_name));
    for snapshot in &sequence.snapshots {
        render_step(out, snapshot);
    }
    out.push('\n');
}

fn render_step(out: &mut String, snapshot: &Snapshot) {
    let mut line = format!(
        "- step {} [{}]",
        snapshot.step_number,
        snapshot.operation.as_str()
    );
    if snapshot.singleton {
        line.push_str(" (only state)");
    }
    line.push_str(&format!(": {}", describe_changes(&snapshot.changes)));
    if let Some(statement) = &snapshot.statement {
        line.push_str(&format!(" via `{}`", statement));
    }
    line.push('\n');
    out.push_str(&line);
}

fn describe_changes(changes: &ChangeSet) -> String {
    if changes.is_empty() {
        return "no structural change".to_string();
    }
    match changes {
        ChangeSet::Array(c) => format!(
            "{} added, {} removed, {} modified",
            c.added.len(),
            c.removed.len(),
            c.modified.len()
        ),
        ChangeSet::Tree(c) => format!(
            "{} added, {} removed, {} modified",
            c.added.len(),
            c.removed.len(),
            c.modified.len()
        ),
        ChangeSet::Graph(c) => format!(
            "{} nodes added, {} nodes removed, {} nodes modified, {} edges added, {} edges removed",
            c.added_nodes.len(),
            c.removed_nodes.len(),
            c.modified_nodes.len(),
            c.added_edges.len(),
            c.removed_edges.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::{Operation, Timestamp, TraceEvent};
    use crate::reconcile::reconcile_arrays;
    use serde_json::json;

    fn event(name: &str, operation: &str, content: serde_json::Value, ts: f64) -> TraceEvent {
        TraceEvent {
            name: name.to_string(),
            operation: Operation::from(operation),
            content: Some(content),
            timestamp: Timestamp(ts),
            location: None,
            operation_details: None,
        }
    }

    #[test]
    fn test_summary_lists_entities_and_steps() {
        let events = vec![
            event("xs", "create_array", json!([1]), 1.0),
            event("xs", "append", json!([1, 2]), 2.0),
        ];
        let reconciliation = reconcile_arrays(&events).unwrap();
        let summary = render_reconciliation_summary(&reconciliation);
        assert!(summary.contains("### `xs`"));
        assert!(summary.contains("step 1"));
        assert!(summary.contains("step 2"));
    }
}
