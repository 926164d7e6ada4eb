//! Graph differ: node/edge comparison of two adjacency maps.

use crate::diff::model::GraphChanges;
use std::collections::{BTreeMap, BTreeSet};

/// Compute the change set between the previous and current graph snapshots.
///
/// Node presence compares map keys; neighbor lists compare as sets, so an
/// order-only change in a neighbor list is not a modification. Edges are
/// directed `(source, target)` pairs taken from adjacency membership.
pub fn diff_graphs(
    previous: &BTreeMap<String, Vec<String>>,
    current: &BTreeMap<String, Vec<String>>,
) -> GraphChanges {
    let mut changes = GraphChanges::default();

    for node in current.keys() {
        if !previous.contains_key(node) {
            changes.added_nodes.insert(node.clone());
        }
    }
    for node in previous.keys() {
        if !current.contains_key(node) {
            changes.removed_nodes.insert(node.clone());
        }
    }

    for (node, curr_neighbors) in current {
        let prev_neighbors = match previous.get(node) {
            Some(list) => list,
            None => continue,
        };
        let prev_set: BTreeSet<&str> = prev_neighbors.iter().map(String::as_str).collect();
        let curr_set: BTreeSet<&str> = curr_neighbors.iter().map(String::as_str).collect();
        if prev_set == curr_set {
            continue;
        }
        changes.modified_nodes.insert(node.clone());
        for target in curr_set.difference(&prev_set) {
            changes
                .added_edges
                .insert((node.clone(), (*target).to_string()));
        }
        for target in prev_set.difference(&curr_set) {
            changes
                .removed_edges
                .insert((node.clone(), (*target).to_string()));
        }
    }

    changes
}

/// All-added change set for the logically-first snapshot of a sequence.
pub fn initial_graph_changes(current: &BTreeMap<String, Vec<String>>) -> GraphChanges {
    let mut changes = GraphChanges::default();
    for (node, neighbors) in current {
        changes.added_nodes.insert(node.clone());
        for target in neighbors {
            changes.added_edges.insert((node.clone(), target.clone()));
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(node, neighbors)| {
                (
                    node.to_string(),
                    neighbors.iter().map(|n| n.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_added_edge_marks_source_modified() {
        let prev = graph(&[("X", &["Y"])]);
        let curr = graph(&[("X", &["Y", "Z"])]);
        let changes = diff_graphs(&prev, &curr);
        assert_eq!(
            changes.added_edges,
            [("X".to_string(), "Z".to_string())].into()
        );
        assert_eq!(changes.modified_nodes, ["X".to_string()].into());
        assert!(changes.added_nodes.is_empty());
    }

    #[test]
    fn test_node_addition_and_removal() {
        let prev = graph(&[("A", &["B"]), ("B", &[])]);
        let curr = graph(&[("A", &["B"]), ("C", &[])]);
        let changes = diff_graphs(&prev, &curr);
        assert_eq!(changes.added_nodes, ["C".to_string()].into());
        assert_eq!(changes.removed_nodes, ["B".to_string()].into());
    }

    #[test]
    fn test_neighbor_reordering_is_not_a_modification() {
        let prev = graph(&[("A", &["B", "C"])]);
        let curr = graph(&[("A", &["C", "B"])]);
        let changes = diff_graphs(&prev, &curr);
        assert!(changes.modified_nodes.is_empty());
        assert!(changes.added_edges.is_empty());
        assert!(changes.removed_edges.is_empty());
    }

    #[test]
    fn test_removed_edge_reported() {
        let prev = graph(&[("A", &["B", "C"])]);
        let curr = graph(&[("A", &["B"])]);
        let changes = diff_graphs(&prev, &curr);
        assert_eq!(
            changes.removed_edges,
            [("A".to_string(), "C".to_string())].into()
        );
    }

    #[test]
    fn test_initial_changes_mark_all_nodes_and_edges() {
        let curr = graph(&[("A", &["B"]), ("B", &[])]);
        let changes = initial_graph_changes(&curr);
        assert_eq!(
            changes.added_nodes,
            ["A".to_string(), "B".to_string()].into()
        );
        assert_eq!(
            changes.added_edges,
            [("A".to_string(), "B".to_string())].into()
        );
    }
}
