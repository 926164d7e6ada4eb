//! Typed, deep-owned snapshot content.
//!
//! The wire format is untyped JSON shared by all three structure families.
//! The engine converts each event's raw `content` into a
//! [`StructureContent`] for the family being reconciled; a value that does
//! not fit the invoked family is an inconsistent-shape error, never a
//! silent reinterpretation.

use crate::errors::{Result, TraceError, TraceErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest as _, Sha256};
use std::collections::{BTreeMap, BTreeSet};

/// Structure family of an entity. Fixed per entity for the engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Ordered sequence of scalars.
    Array,
    /// Binary or n-ary tree of value-bearing nodes.
    Tree,
    /// Adjacency-list graph (node-id → ordered neighbor list).
    Graph,
}

impl StructureKind {
    /// Human-readable family name, as used in error messages and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::Tree => "tree",
            StructureKind::Graph => "graph",
        }
    }
}

/// A tree node: scalar `value` plus either binary `left`/`right` slots or
/// an ordered `children` list. Both may be absent for a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Scalar payload of this node.
    pub value: Value,
    /// Binary left child, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<TreeNode>>,
    /// Binary right child, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<TreeNode>>,
    /// Ordered children list for n-ary trees, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Recursive node count over `left`/`right` and `children`.
    pub fn node_count(&self) -> usize {
        let mut count = 1;
        if let Some(left) = &self.left {
            count += left.node_count();
        }
        if let Some(right) = &self.right {
            count += right.node_count();
        }
        if let Some(children) = &self.children {
            count += children.iter().map(TreeNode::node_count).sum::<usize>();
        }
        count
    }

    /// Deep structural equality over value + children shape.
    ///
    /// Equivalent to `==` but kept as a named operation because the dedup
    /// stage's retention rule is defined in terms of it.
    pub fn structurally_identical(&self, other: &TreeNode) -> bool {
        self == other
    }
}

/// Deep-owned, typed snapshot content for one of the three families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureContent {
    /// Ordered sequence of scalars.
    Array(Vec<Value>),
    /// Tree rooted at a single node.
    Tree(TreeNode),
    /// Adjacency map: node-id → ordered neighbor ids.
    Graph(BTreeMap<String, Vec<String>>),
}

impl StructureContent {
    /// The family this content belongs to.
    pub fn kind(&self) -> StructureKind {
        match self {
            StructureContent::Array(_) => StructureKind::Array,
            StructureContent::Tree(_) => StructureKind::Tree,
            StructureContent::Graph(_) => StructureKind::Graph,
        }
    }

    /// SHA-256 fingerprint of the canonical JSON form.
    ///
    /// Used as a cheap equality fast-path by the dedup stage. Graph
    /// neighbor lists hash as sorted sets, matching the differ's
    /// membership comparison, so a reorder-only observation fingerprints
    /// identically to its predecessor and collapses instead of surfacing
    /// as an empty transition.
    pub fn fingerprint(&self) -> String {
        // BTreeMap keys serialize sorted, so the JSON form is canonical.
        let canonical = match self {
            StructureContent::Graph(adjacency) => {
                let normalized: BTreeMap<&String, BTreeSet<&String>> = adjacency
                    .iter()
                    .map(|(node, neighbors)| (node, neighbors.iter().collect()))
                    .collect();
                serde_json::to_string(&normalized).unwrap_or_default()
            }
            other => serde_json::to_string(other).unwrap_or_default(),
        };
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Convert a raw event content value into array-shaped content.
///
/// # Errors
///
/// `InconsistentShape`: the value is not a JSON array.
pub fn as_array_content(entity: &str, value: &Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        other => Err(shape_error(entity, StructureKind::Array, other)),
    }
}

/// Convert a raw event content value into tree-shaped content.
///
/// # Errors
///
/// `InconsistentShape`: the value is not a node record with a `value` field.
pub fn as_tree_content(entity: &str, value: &Value) -> Result<TreeNode> {
    let looks_like_node = value
        .as_object()
        .map(|obj| obj.contains_key("value"))
        .unwrap_or(false);
    if !looks_like_node {
        return Err(shape_error(entity, StructureKind::Tree, value));
    }
    serde_json::from_value(value.clone()).map_err(|e| {
        TraceError::new(TraceErrorKind::InconsistentShape)
            .with_op("as_tree_content")
            .with_entity(entity)
            .with_message(format!("malformed tree node: {}", e))
    })
}

/// Convert a raw event content value into graph-shaped content.
///
/// # Errors
///
/// `InconsistentShape`: the value is not an object mapping node ids to
/// neighbor-id arrays.
pub fn as_graph_content(entity: &str, value: &Value) -> Result<BTreeMap<String, Vec<String>>> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(shape_error(entity, StructureKind::Graph, value)),
    };
    // A node record is an object too; reject it explicitly so a tree-shaped
    // entity invoked through the graph entry point fails loudly.
    if obj.contains_key("value") && !obj.get("value").map(Value::is_array).unwrap_or(false) {
        return Err(shape_error(entity, StructureKind::Graph, value));
    }
    let mut adjacency = BTreeMap::new();
    for (node_id, neighbors) in obj {
        let list = neighbors
            .as_array()
            .ok_or_else(|| shape_error(entity, StructureKind::Graph, value))?;
        let mut ids = Vec::with_capacity(list.len());
        for neighbor in list {
            match neighbor {
                Value::String(s) => ids.push(s.clone()),
                // The tracer serializes non-string node ids as scalars.
                Value::Number(n) => ids.push(n.to_string()),
                Value::Bool(b) => ids.push(b.to_string()),
                _ => return Err(shape_error(entity, StructureKind::Graph, value)),
            }
        }
        adjacency.insert(node_id.clone(), ids);
    }
    Ok(adjacency)
}

fn shape_error(entity: &str, expected: StructureKind, found: &Value) -> TraceError {
    let found_desc = match found {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "JSON array",
        Value::Object(_) => "JSON object",
    };
    TraceError::new(TraceErrorKind::InconsistentShape)
        .with_op("content_conversion")
        .with_entity(entity)
        .with_message(format!(
            "expected {}-shaped content, found {}",
            expected.as_str(),
            found_desc
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_count_covers_binary_and_nary_slots() {
        let tree: TreeNode = serde_json::from_value(json!({
            "value": 1,
            "left": { "value": 2 },
            "right": { "value": 3, "children": [ { "value": 4 }, { "value": 5 } ] }
        }))
        .unwrap();
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_array_content_rejects_tree_node() {
        let err = as_array_content("t", &json!({ "value": 1 })).unwrap_err();
        assert_eq!(err.kind(), TraceErrorKind::InconsistentShape);
    }

    #[test]
    fn test_graph_content_rejects_tree_node() {
        let err = as_graph_content("t", &json!({ "value": 1, "left": null })).unwrap_err();
        assert_eq!(err.kind(), TraceErrorKind::InconsistentShape);
    }

    #[test]
    fn test_graph_content_normalizes_numeric_ids() {
        let adjacency = as_graph_content("g", &json!({ "1": [2, 3] })).unwrap();
        assert_eq!(adjacency["1"], vec!["2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_fingerprint_is_stable_for_equal_content() {
        let a = StructureContent::Array(vec![json!(1), json!(2)]);
        let b = StructureContent::Array(vec![json!(1), json!(2)]);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_graph_fingerprint_ignores_neighbor_order() {
        let a = StructureContent::Graph(as_graph_content("g", &json!({ "a": ["b", "c"] })).unwrap());
        let b = StructureContent::Graph(as_graph_content("g", &json!({ "a": ["c", "b"] })).unwrap());
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = StructureContent::Graph(as_graph_content("g", &json!({ "a": ["c"] })).unwrap());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
