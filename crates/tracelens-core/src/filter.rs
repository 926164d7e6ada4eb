//! Event filter: drops internal bookkeeping observations.

use crate::model::event::TraceEvent;

/// Drop function-call/return bookkeeping markers from a raw log.
///
/// Pure, total, order-preserving. Unknown operation kinds pass through
/// unfiltered; only the internal markers are bookkeeping.
pub fn drop_bookkeeping(events: &[TraceEvent]) -> Vec<TraceEvent> {
    events
        .iter()
        .filter(|event| !event.operation.is_internal())
        .cloned()
        .collect()
}

/// Filter bookkeeping and stable-sort the survivors chronologically.
///
/// The raw log interleaves entities in emission order; every downstream
/// stage assumes timestamp order. The sort is stable, so observations
/// sharing a timestamp keep their emission order.
pub fn filter_and_order(events: &[TraceEvent]) -> Vec<TraceEvent> {
    let mut filtered = drop_bookkeeping(events);
    filtered.sort_by_key(|event| event.timestamp);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::{Operation, Timestamp};

    fn event(name: &str, operation: &str, ts: f64) -> TraceEvent {
        TraceEvent {
            name: name.to_string(),
            operation: Operation::from(operation),
            content: None,
            timestamp: Timestamp(ts),
            location: None,
            operation_details: None,
        }
    }

    #[test]
    fn test_internal_markers_are_dropped() {
        let events = vec![
            event("f", "call", 1.0),
            event("xs", "append", 2.0),
            event("f", "exit", 3.0),
        ];
        let filtered = drop_bookkeeping(&events);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "xs");
    }

    #[test]
    fn test_unknown_operations_pass_through() {
        let events = vec![event("t", "set_left_child", 1.0)];
        assert_eq!(drop_bookkeeping(&events).len(), 1);
    }

    #[test]
    fn test_ordering_is_chronological_and_stable() {
        let events = vec![
            event("b", "append", 2.0),
            event("a", "append", 1.0),
            event("c", "append", 2.0),
        ];
        let ordered = filter_and_order(&events);
        let names: Vec<&str> = ordered.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
