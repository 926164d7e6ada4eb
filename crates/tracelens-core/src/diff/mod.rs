//! Shape-specific differs.
//!
//! Three algorithms, one per structure family, each computing a
//! [`model::ChangeSet`] between two snapshots of the same entity:
//!
//! - arrays: index-addressed element comparison with operation-aware
//!   corrections (`append`, insert-at-front, `pop`);
//! - trees: lock-step canonical-path recursion (slot identity, never
//!   value search);
//! - graphs: adjacency-map key and neighbor-set comparison.
//!
//! A missing previous snapshot yields an all-added change set by
//! definition, never an error.

pub mod array;
pub mod graph;
pub mod model;
pub mod tree;

pub use array::{diff_arrays, initial_array_changes};
pub use graph::{diff_graphs, initial_graph_changes};
pub use model::{ArrayChanges, ChangeSet, GraphChanges, TreeChanges};
pub use tree::{diff_trees, initial_tree_changes};

use crate::model::content::StructureContent;
use crate::model::event::Operation;

/// Compute the change set for `current` content relative to the optional
/// `previous` content of the same entity.
///
/// `operation` and `statement` describe the observation that produced
/// `current`; the array differ consults them for its corrections. Both
/// contents belong to the same structure family; the dedup stage
/// guarantees this before any differ runs.
pub fn compute_changes(
    previous: Option<&StructureContent>,
    current: &StructureContent,
    operation: &Operation,
    statement: Option<&str>,
) -> ChangeSet {
    match (current, previous) {
        (StructureContent::Array(curr), None) => ChangeSet::Array(initial_array_changes(curr)),
        (StructureContent::Array(curr), Some(StructureContent::Array(prev))) => {
            ChangeSet::Array(diff_arrays(prev, curr, operation, statement))
        }
        (StructureContent::Tree(curr), None) => ChangeSet::Tree(initial_tree_changes(curr)),
        (StructureContent::Tree(curr), Some(StructureContent::Tree(prev))) => {
            ChangeSet::Tree(diff_trees(prev, curr))
        }
        (StructureContent::Graph(curr), None) => ChangeSet::Graph(initial_graph_changes(curr)),
        (StructureContent::Graph(curr), Some(StructureContent::Graph(prev))) => {
            ChangeSet::Graph(diff_graphs(prev, curr))
        }
        // Family mismatch within one sequence cannot happen: content is
        // validated per family before snapshots are built. Treat the
        // current snapshot as logically-first rather than guessing.
        (StructureContent::Array(curr), Some(_)) => ChangeSet::Array(initial_array_changes(curr)),
        (StructureContent::Tree(curr), Some(_)) => ChangeSet::Tree(initial_tree_changes(curr)),
        (StructureContent::Graph(curr), Some(_)) => ChangeSet::Graph(initial_graph_changes(curr)),
    }
}
