//! Change-set output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Collections use `BTreeSet` for deterministic serialization; the
//! rendering collaborator consumes these classifications verbatim and
//! performs no diffing of its own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structural diff between two consecutive snapshots of one entity.
///
/// The variant always matches the entity's structure family; the first
/// snapshot of a sequence carries an all-added change set by definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeSet {
    /// Index-addressed changes for array-shaped entities.
    Array(ArrayChanges),
    /// Canonical-path-addressed changes for tree-shaped entities.
    Tree(TreeChanges),
    /// Node/edge-addressed changes for graph-shaped entities.
    Graph(GraphChanges),
}

impl ChangeSet {
    /// True when nothing was added, removed, or modified.
    pub fn is_empty(&self) -> bool {
        match self {
            ChangeSet::Array(c) => {
                c.added.is_empty() && c.removed.is_empty() && c.modified.is_empty()
            }
            ChangeSet::Tree(c) => c.added.is_empty() && c.removed.is_empty() && c.modified.is_empty(),
            ChangeSet::Graph(c) => {
                c.added_nodes.is_empty()
                    && c.removed_nodes.is_empty()
                    && c.modified_nodes.is_empty()
                    && c.added_edges.is_empty()
                    && c.removed_edges.is_empty()
            }
        }
    }
}

/// Index-addressed change set for arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayChanges {
    /// Indices present in the current snapshot but not the previous one.
    pub added: BTreeSet<usize>,
    /// Indices present in the previous snapshot but not the current one.
    pub removed: BTreeSet<usize>,
    /// Indices present in both with a different element value.
    pub modified: BTreeSet<usize>,
}

/// Canonical-path-addressed change set for trees.
///
/// The root's canonical path is the literal token `root`; every other
/// node's path appends `.left`, `.right`, or `.children[k]` segments.
/// Added and removed subtrees are marked recursively: every node of the
/// subtree appears with its own path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeChanges {
    /// Paths occupied in the current snapshot with no counterpart before.
    pub added: BTreeSet<String>,
    /// Paths occupied in the previous snapshot with no counterpart now.
    pub removed: BTreeSet<String>,
    /// Paths occupied in both snapshots whose scalar value differs.
    pub modified: BTreeSet<String>,
}

/// Node/edge-addressed change set for adjacency-list graphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphChanges {
    /// Node ids present now but not before.
    pub added_nodes: BTreeSet<String>,
    /// Node ids present before but not now.
    pub removed_nodes: BTreeSet<String>,
    /// Node ids present in both whose neighbor set differs.
    pub modified_nodes: BTreeSet<String>,
    /// `(source, target)` pairs present now but not before.
    pub added_edges: BTreeSet<(String, String)>,
    /// `(source, target)` pairs present before but not now.
    pub removed_edges: BTreeSet<(String, String)>,
}
