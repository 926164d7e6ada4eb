//! Entity grouper: partitions the filtered log by entity name and, for
//! tree-shaped data, resolves the single primary entity.
//!
//! Array and graph grouping is exact. Tree logs are messier: recursive
//! helpers and loop locals (`node`, `current`, ...) alias sub-structures of
//! one logical tree, so rendering each name independently would show
//! disconnected fragments. The grouper picks one primary name and discards
//! evidence of unrelated reuse of that name.

use crate::errors::Result;
use crate::model::content::as_tree_content;
use crate::model::event::TraceEvent;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Partition a filtered log by entity name, preserving chronological order
/// within each group.
pub fn group_by_entity(events: &[TraceEvent]) -> BTreeMap<String, Vec<TraceEvent>> {
    let mut groups: BTreeMap<String, Vec<TraceEvent>> = BTreeMap::new();
    for event in events {
        groups
            .entry(event.name.clone())
            .or_default()
            .push(event.clone());
    }
    groups
}

/// The resolved primary tree entity and its surviving observations.
#[derive(Debug, Clone)]
pub struct PrimarySelection {
    /// Name of the primary entity.
    pub primary_name: String,
    /// Root `value` of the primary structure. Events under the primary
    /// name with a different root value are reused-variable noise and are
    /// discarded entirely.
    pub primary_root_value: Value,
    /// Content-bearing events of the primary entity, chronological.
    pub events: Vec<TraceEvent>,
}

/// Resolve the primary tree entity from a filtered, ordered log.
///
/// Selection order:
/// 1. the final-state event whose content has the greatest node count
///    names the primary entity and fixes the primary root value;
/// 2. with no final-state event, the most frequently observed name wins,
///    and the root value comes from its first content-bearing event;
/// 3. events under the primary name whose root value differs are dropped
///    (a reused variable pointing at an unrelated structure, not noise to
///    dedup).
///
/// Returns `Ok(None)` for a log with no usable tree content: an empty
/// grouping, not an error.
///
/// # Errors
///
/// `InconsistentShape`: an event under consideration carries content that
/// is not tree-shaped.
pub fn select_primary_tree(events: &[TraceEvent]) -> Result<Option<PrimarySelection>> {
    // Pass 1: largest final-state content wins.
    let mut primary_name: Option<String> = None;
    let mut primary_root_value: Option<Value> = None;
    let mut max_nodes = 0usize;

    for event in events {
        if !event.operation.is_final_state() {
            continue;
        }
        let content = match &event.content {
            Some(content) => content,
            None => continue,
        };
        let tree = as_tree_content(&event.name, content)?;
        let nodes = tree.node_count();
        if nodes > max_nodes {
            max_nodes = nodes;
            primary_name = Some(event.name.clone());
            primary_root_value = Some(tree.value.clone());
        }
    }

    // Pass 2 (fallback): most frequently observed name.
    if primary_name.is_none() {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for event in events {
            *counts.entry(event.name.as_str()).or_default() += 1;
        }
        // BTreeMap iteration makes the tie-break deterministic (lexicographic).
        if let Some((name, _)) = counts.iter().max_by_key(|(_, count)| **count) {
            primary_name = Some((*name).to_string());
        }
    }

    let primary_name = match primary_name {
        Some(name) => name,
        None => return Ok(None),
    };

    // Fallback root value: first content-bearing event under the primary name.
    if primary_root_value.is_none() {
        for event in events {
            if event.name != primary_name {
                continue;
            }
            if let Some(content) = &event.content {
                let tree = as_tree_content(&event.name, content)?;
                primary_root_value = Some(tree.value);
                break;
            }
        }
    }
    let primary_root_value = match primary_root_value {
        Some(value) => value,
        None => return Ok(None),
    };

    // Pass 3: restrict to events whose root value matches the primary's.
    let mut selected = Vec::new();
    let mut discarded = 0usize;
    for event in events {
        if event.name != primary_name {
            continue;
        }
        let content = match &event.content {
            Some(content) => content,
            None => continue,
        };
        let tree = as_tree_content(&event.name, content)?;
        if tree.value == primary_root_value {
            selected.push(event.clone());
        } else {
            discarded += 1;
        }
    }

    debug!(
        primary = %primary_name,
        max_nodes,
        selected = selected.len(),
        discarded,
        "resolved primary tree entity"
    );

    Ok(Some(PrimarySelection {
        primary_name,
        primary_root_value,
        events: selected,
    }))
}
