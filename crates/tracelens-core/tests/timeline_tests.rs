//! Cross-entity timeline merging scenarios.

use serde_json::{json, Value};
use tracelens_core::model::event::{Operation, Timestamp, TraceEvent};
use tracelens_core::reconcile::reconcile_arrays;
use tracelens_core::timeline::{cell_at, merge_timeline};

fn event(name: &str, operation: &str, content: Value, ts: f64) -> TraceEvent {
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
fn test_marks_are_the_union_of_snapshot_timestamps() {
    let events = vec![
        event("xs", "create_array", json!([1]), 1.0),
        event("ys", "create_array", json!([9]), 2.0),
        event("xs", "append", json!([1, 2]), 3.0),
    ];
    let reconciliation = reconcile_arrays(&events).unwrap();
    let timeline = merge_timeline(&reconciliation);
    assert_eq!(
        timeline.timestamps,
        vec![Timestamp(1.0), Timestamp(2.0), Timestamp(3.0)]
    );
    assert_eq!(timeline.rows.len(), 2);
}

#[test]
fn test_exact_match_is_not_carried_forward() {
    let events = vec![
        event("xs", "create_array", json!([1]), 1.0),
        event("xs", "append", json!([1, 2]), 2.0),
    ];
    let reconciliation = reconcile_arrays(&events).unwrap();
    let timeline = merge_timeline(&reconciliation);
    let row = &timeline.rows[0];
    let cell = row.cells[1].as_ref().unwrap();
    assert_eq!(cell.step_number, 2);
    assert!(!cell.carried_forward);
}

#[test]
fn test_silent_entity_is_absent_at_foreign_marks() {
    // ys changes only at t=2; at t=1 and t=3 (xs's marks) it has no cell.
    let events = vec![
        event("xs", "create_array", json!([1]), 1.0),
        event("ys", "create_array", json!([9]), 2.0),
        event("xs", "append", json!([1, 2]), 3.0),
    ];
    let reconciliation = reconcile_arrays(&events).unwrap();
    let timeline = merge_timeline(&reconciliation);
    let ys = timeline
        .rows
        .iter()
        .find(|row| row.entity_name == "ys")
        .unwrap();
    assert!(ys.cells[0].is_none());
    assert!(ys.cells[1].is_some());
    assert!(ys.cells[2].is_none());
}

#[test]
fn test_every_entity_appears_at_least_once() {
    // A singleton entity whose one retained snapshot is the final-state
    // observation still lands somewhere on the timeline.
    let events = vec![
        event("xs", "create_array", json!([1]), 1.0),
        event("xs", "append", json!([1, 2]), 2.0),
        event("ys", "observation", json!([5]), 1.5),
        event("ys", "final_state", json!([5]), 3.0),
    ];
    let reconciliation = reconcile_arrays(&events).unwrap();
    let timeline = merge_timeline(&reconciliation);
    for row in &timeline.rows {
        assert!(
            row.cells.iter().any(|cell| cell.is_some()),
            "entity {} has no cell",
            row.entity_name
        );
    }
}

#[test]
fn test_merged_cells_are_never_carried_forward() {
    let events = vec![
        event("xs", "create_array", json!([1]), 1.0),
        event("ys", "create_array", json!([9]), 2.0),
        event("xs", "append", json!([1, 2]), 3.0),
    ];
    let reconciliation = reconcile_arrays(&events).unwrap();
    let timeline = merge_timeline(&reconciliation);
    for row in &timeline.rows {
        for cell in row.cells.iter().flatten() {
            assert!(!cell.carried_forward);
        }
    }
}

#[test]
fn test_cell_at_carries_last_known_state_forward() {
    let events = vec![
        event("xs", "create_array", json!([1]), 1.0),
        event("xs", "append", json!([1, 2]), 3.0),
    ];
    let reconciliation = reconcile_arrays(&events).unwrap();
    let xs = &reconciliation.entities["xs"];

    // Between its own marks: latest snapshot at or before the mark.
    let between = cell_at(xs, Timestamp(2.0)).unwrap();
    assert_eq!(between.step_number, 1);
    assert!(between.carried_forward);

    // Before any snapshot: the first snapshot as a last resort.
    let before = cell_at(xs, Timestamp(0.5)).unwrap();
    assert_eq!(before.step_number, 1);
    assert!(before.carried_forward);

    // After everything: the final snapshot.
    let after = cell_at(xs, Timestamp(9.0)).unwrap();
    assert_eq!(after.step_number, 2);
    assert!(after.carried_forward);
}

#[test]
fn test_empty_reconciliation_merges_to_empty_timeline() {
    let reconciliation = reconcile_arrays(&[]).unwrap();
    let timeline = merge_timeline(&reconciliation);
    assert!(timeline.timestamps.is_empty());
    assert!(timeline.rows.is_empty());
}
