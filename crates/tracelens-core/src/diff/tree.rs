//! Tree differ: canonical-path-addressed, lock-step structural comparison.
//!
//! Snapshots are independently deep-copied, so no object identity survives
//! between them. Identity is therefore positional: the walk recurses over
//! `(previous, current)` node pairs at the same canonical path, never
//! searching by value. Value-based matching is deliberately avoided: two
//! structurally-identical sibling values would make it ambiguous.

use crate::diff::model::TreeChanges;
use crate::model::content::TreeNode;

/// Canonical path of a tree's root node.
pub const ROOT_PATH: &str = "root";

/// Append a `.left` segment to a canonical path.
pub fn left_path(parent: &str) -> String {
    format!("{parent}.left")
}

/// Append a `.right` segment to a canonical path.
pub fn right_path(parent: &str) -> String {
    format!("{parent}.right")
}

/// Append a `.children[k]` segment to a canonical path.
pub fn child_path(parent: &str, index: usize) -> String {
    format!("{parent}.children[{index}]")
}

/// Compute the change set between the previous and current tree snapshots.
///
/// Slot resolution order:
/// 1. lock-step walk over both trees at the same path;
/// 2. a node present in `current` where `previous` ran out of structure is
///    `added` at that path, and its entire subtree is marked `added`
///    recursively (the symmetric case is marked `removed`);
/// 3. a node present at the same path in both is `modified` iff its scalar
///    `value` differs; recursion continues into every slot present on
///    either side.
pub fn diff_trees(previous: &TreeNode, current: &TreeNode) -> TreeChanges {
    let mut changes = TreeChanges::default();
    compare_nodes(Some(previous), Some(current), ROOT_PATH, &mut changes);
    changes
}

/// All-added change set for the logically-first snapshot of a sequence.
pub fn initial_tree_changes(current: &TreeNode) -> TreeChanges {
    let mut changes = TreeChanges::default();
    mark_subtree(current, ROOT_PATH, &mut changes.added);
    changes
}

fn compare_nodes(
    previous: Option<&TreeNode>,
    current: Option<&TreeNode>,
    path: &str,
    changes: &mut TreeChanges,
) {
    match (previous, current) {
        (None, None) => {}
        (None, Some(node)) => {
            mark_subtree(node, path, &mut changes.added);
        }
        (Some(node), None) => {
            mark_subtree(node, path, &mut changes.removed);
        }
        (Some(prev), Some(curr)) => {
            if prev.value != curr.value {
                changes.modified.insert(path.to_string());
            }

            if prev.left.is_some() || curr.left.is_some() {
                compare_nodes(
                    prev.left.as_deref(),
                    curr.left.as_deref(),
                    &left_path(path),
                    changes,
                );
            }
            if prev.right.is_some() || curr.right.is_some() {
                compare_nodes(
                    prev.right.as_deref(),
                    curr.right.as_deref(),
                    &right_path(path),
                    changes,
                );
            }

            let prev_children = prev.children.as_deref().unwrap_or(&[]);
            let curr_children = curr.children.as_deref().unwrap_or(&[]);
            let slots = prev_children.len().max(curr_children.len());
            for k in 0..slots {
                compare_nodes(
                    prev_children.get(k),
                    curr_children.get(k),
                    &child_path(path, k),
                    changes,
                );
            }
        }
    }
}

/// Record `node` and every descendant under `path` into `target`.
fn mark_subtree(
    node: &TreeNode,
    path: &str,
    target: &mut std::collections::BTreeSet<String>,
) {
    target.insert(path.to_string());
    if let Some(left) = &node.left {
        mark_subtree(left, &left_path(path), target);
    }
    if let Some(right) = &node.right {
        mark_subtree(right, &right_path(path), target);
    }
    if let Some(children) = &node.children {
        for (k, child) in children.iter().enumerate() {
            mark_subtree(child, &child_path(path, k), target);
        }
    }
}
