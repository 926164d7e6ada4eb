//! Dedup/noise filter: collapses repeated content and suppresses
//! mid-mutation artifacts, producing the retained observations that become
//! snapshots.
//!
//! Arrays and graphs need only content-equality collapsing. Trees get an
//! additional heuristic layer: snapshots taken while a large structure is
//! still being assembled look like valid-but-incomplete trees, and showing
//! them would read as regressions. The node-count trend and the edit
//! classifier separate those from deliberate edits.

use crate::classify::EditClassifier;
use crate::config::ReconcileConfig;
use crate::errors::Result;
use crate::grouping::PrimarySelection;
use crate::model::content::{
    as_array_content, as_graph_content, as_tree_content, StructureContent, StructureKind,
};
use crate::model::event::{Operation, Timestamp, TraceEvent};
use std::collections::BTreeSet;
use tracing::debug;

/// One surviving observation, deep-owned, not yet numbered or diffed.
#[derive(Debug, Clone)]
pub struct Retained {
    /// Name of the observed entity.
    pub entity_name: String,
    /// Typed, deep-owned content.
    pub content: StructureContent,
    /// Operation of the surviving observation.
    pub operation: Operation,
    /// Ordering key of the surviving observation.
    pub timestamp: Timestamp,
    /// Source location, carried through.
    pub location: Option<String>,
    /// Triggering-statement text, carried through.
    pub statement: Option<String>,
    /// True when this is the entity's only retained observation.
    pub singleton: bool,
}

impl Retained {
    fn from_event(event: &TraceEvent, content: StructureContent) -> Self {
        Self {
            entity_name: event.name.clone(),
            content,
            operation: event.operation.clone(),
            timestamp: event.timestamp,
            location: event.location.clone(),
            statement: event.statement().map(str::to_string),
            singleton: false,
        }
    }
}

/// Convert one event's raw content for a flat (array/graph) family.
///
/// Events without content yield `None`; they are skipped, not errors.
fn convert_flat(
    kind: StructureKind,
    event: &TraceEvent,
) -> Result<Option<StructureContent>> {
    let raw = match &event.content {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let content = match kind {
        StructureKind::Array => StructureContent::Array(as_array_content(&event.name, raw)?),
        StructureKind::Graph => StructureContent::Graph(as_graph_content(&event.name, raw)?),
        StructureKind::Tree => StructureContent::Tree(as_tree_content(&event.name, raw)?),
    };
    Ok(Some(content))
}

/// Dedup one array- or graph-shaped entity's chronological events.
///
/// Retention rule: keep an observation if it is the first for the entity
/// or its content differs from the immediately preceding retained content.
/// A redundant final-state (same content as last retained) is dropped.
///
/// Guarantee: any entity with at least one content-bearing event yields at
/// least one retained observation. If only one survives, it is rebuilt
/// from the final-state event when one exists and flagged as a singleton.
///
/// # Errors
///
/// `InconsistentShape`: an event's content does not fit `kind`.
pub fn dedup_flat(
    kind: StructureKind,
    entity: &str,
    events: &[TraceEvent],
) -> Result<Vec<Retained>> {
    let mut retained: Vec<Retained> = Vec::new();
    let mut last_fingerprint: Option<String> = None;

    for event in events {
        let content = match convert_flat(kind, event)? {
            Some(content) => content,
            None => continue,
        };
        let fingerprint = content.fingerprint();
        if last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            continue;
        }
        last_fingerprint = Some(fingerprint);
        retained.push(Retained::from_event(event, content));
    }

    if retained.len() == 1 {
        // The entity's content never changed. Prefer the final-state
        // observation as the one retained snapshot and flag it so the
        // renderer does not expect a transition into it.
        let final_state = events
            .iter()
            .filter(|e| e.operation.is_final_state())
            .find_map(|e| {
                convert_flat(kind, e)
                    .ok()
                    .flatten()
                    .map(|content| Retained::from_event(e, content))
            });
        let mut only = final_state.unwrap_or_else(|| retained.remove(0));
        only.singleton = true;
        retained = vec![only];
    }

    debug!(
        entity,
        family = kind.as_str(),
        events = events.len(),
        retained = retained.len(),
        "deduplicated entity"
    );
    Ok(retained)
}

/// Dedup the primary tree entity's events with noise suppression.
///
/// On top of structural-equality collapsing, three tree-specific rules:
///
/// - one retained state per timestamp (the reconstruction keeps the first);
/// - a candidate the classifier flags as a modification is exempt from the
///   node-count suppression even when it shrinks the tree; those are
///   deliberate edits to an already-built structure;
/// - a non-modification, non-final-state candidate whose node count falls
///   below `shrink_tolerance` of the maximum seen so far is discarded as a
///   partially-assembled mid-construction artifact.
///
/// Structural identity with the last retained state collapses a candidate
/// unconditionally; an edit statement that left the tree unchanged is not
/// a step.
///
/// The maximum node count is threaded as an explicit fold accumulator and
/// only advanced by retained states.
///
/// # Errors
///
/// `InconsistentShape`: an event's content is not tree-shaped.
pub fn dedup_tree(
    selection: &PrimarySelection,
    config: &ReconcileConfig,
    classifier: &dyn EditClassifier,
) -> Result<Vec<Retained>> {
    let mut retained: Vec<Retained> = Vec::new();
    let mut last_tree: Option<crate::model::content::TreeNode> = None;
    let mut max_nodes_seen = 0usize;
    let mut processed_timestamps: BTreeSet<Timestamp> = BTreeSet::new();
    let mut suppressed = 0usize;

    for event in &selection.events {
        let raw = match &event.content {
            Some(raw) => raw,
            None => continue,
        };
        if processed_timestamps.contains(&event.timestamp) {
            continue;
        }
        let tree = as_tree_content(&event.name, raw)?;
        let node_count = tree.node_count();
        let is_final = event.operation.is_final_state();
        let is_modification = classifier.classify(event).is_modification();

        // Mid-construction artifact: the structure got markedly smaller
        // without an edit statement to explain it, and this is not the
        // always-trusted final state.
        let floor = (max_nodes_seen as f64) * config.shrink_tolerance;
        if !is_modification && !is_final && (node_count as f64) < floor {
            suppressed += 1;
            continue;
        }

        let structurally_new = last_tree
            .as_ref()
            .map(|last| !last.structurally_identical(&tree))
            .unwrap_or(true);
        if !structurally_new {
            continue;
        }

        last_tree = Some(tree.clone());
        max_nodes_seen = max_nodes_seen.max(node_count);
        processed_timestamps.insert(event.timestamp);
        retained.push(Retained::from_event(
            event,
            StructureContent::Tree(tree),
        ));
    }

    if retained.len() == 1 {
        retained[0].singleton = true;
    }

    debug!(
        entity = %selection.primary_name,
        events = selection.events.len(),
        retained = retained.len(),
        suppressed,
        max_nodes_seen,
        "deduplicated primary tree"
    );
    Ok(retained)
}
