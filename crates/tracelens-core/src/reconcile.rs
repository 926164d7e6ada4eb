//! Reconciliation entry points.
//!
//! One entry point per structure family, each a pure, synchronous batch
//! computation: raw log in, ordered and diffed snapshot sequences out.
//! Repeated invocation with an unchanged input is idempotent; the
//! [`Reconciler`] wrapper adds last-result memoization keyed on a digest
//! of the input log.

use crate::classify::{EditClassifier, HeuristicClassifier};
use crate::config::ReconcileConfig;
use crate::dedup::{dedup_flat, dedup_tree, Retained};
use crate::diff::compute_changes;
use crate::errors::Result;
use crate::filter::filter_and_order;
use crate::grouping::{group_by_entity, select_primary_tree};
use crate::model::content::StructureKind;
use crate::model::event::TraceEvent;
use crate::model::snapshot::{EntitySequence, Snapshot};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::BTreeMap;
use tracing::info;

/// Reconciled output for the array and graph families: one diffed
/// sequence per entity name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Structure family of every sequence in this result.
    pub kind: StructureKind,
    /// Per-entity snapshot sequences, keyed by entity name.
    pub entities: BTreeMap<String, EntitySequence>,
}

impl Reconciliation {
    /// Total number of retained snapshots across all entities.
    pub fn snapshot_count(&self) -> usize {
        self.entities.values().map(|seq| seq.snapshots.len()).sum()
    }
}

/// Reconciled output for the tree family: the single primary entity's
/// diffed sequence plus its resolved name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeReconciliation {
    /// Name of the resolved primary entity.
    pub primary_entity: String,
    /// The primary entity's snapshot sequence.
    pub sequence: EntitySequence,
}

/// Number retained observations densely and attach pairwise change sets.
fn annotate(kind: StructureKind, retained: Vec<Retained>) -> EntitySequence {
    let entity_name = retained
        .first()
        .map(|r| r.entity_name.clone())
        .unwrap_or_default();
    let mut snapshots: Vec<Snapshot> = Vec::with_capacity(retained.len());

    for (index, item) in retained.into_iter().enumerate() {
        let changes = compute_changes(
            snapshots.last().map(|prev| &prev.content),
            &item.content,
            &item.operation,
            item.statement.as_deref(),
        );
        snapshots.push(Snapshot {
            entity_name: item.entity_name,
            content: item.content,
            operation: item.operation,
            timestamp: item.timestamp,
            step_number: (index + 1) as u32,
            location: item.location,
            statement: item.statement,
            singleton: item.singleton,
            changes,
        });
    }

    EntitySequence {
        entity_name,
        kind,
        snapshots,
    }
}

fn reconcile_flat(kind: StructureKind, events: &[TraceEvent]) -> Result<Reconciliation> {
    let filtered = filter_and_order(events);
    let groups = group_by_entity(&filtered);

    let mut entities = BTreeMap::new();
    for (name, group) in &groups {
        let retained = dedup_flat(kind, name, group)?;
        if retained.is_empty() {
            // Entity never carried content; nothing to snapshot.
            continue;
        }
        entities.insert(name.clone(), annotate(kind, retained));
    }

    let result = Reconciliation { kind, entities };
    info!(
        family = kind.as_str(),
        raw_events = events.len(),
        entities = result.entities.len(),
        snapshots = result.snapshot_count(),
        "reconciled log"
    );
    Ok(result)
}

/// Reconcile an array-family trace log.
///
/// # Errors
///
/// `InconsistentShape`: some entity's content is not array-shaped.
pub fn reconcile_arrays(events: &[TraceEvent]) -> Result<Reconciliation> {
    reconcile_flat(StructureKind::Array, events)
}

/// Reconcile a graph-family trace log.
///
/// # Errors
///
/// `InconsistentShape`: some entity's content is not an adjacency map.
pub fn reconcile_graphs(events: &[TraceEvent]) -> Result<Reconciliation> {
    reconcile_flat(StructureKind::Graph, events)
}

/// Reconcile a tree-family trace log.
///
/// Resolves the primary entity, suppresses construction noise, and returns
/// the primary sequence. `Ok(None)` means the log held no usable tree
/// content; an empty result, not an error.
///
/// # Errors
///
/// `InconsistentShape`: an event's content is not tree-shaped.
pub fn reconcile_trees(
    events: &[TraceEvent],
    config: &ReconcileConfig,
    classifier: &dyn EditClassifier,
) -> Result<Option<TreeReconciliation>> {
    let filtered = filter_and_order(events);
    let selection = match select_primary_tree(&filtered)? {
        Some(selection) => selection,
        None => {
            info!(raw_events = events.len(), "no primary tree entity in log");
            return Ok(None);
        }
    };
    let retained = dedup_tree(&selection, config, classifier)?;
    if retained.is_empty() {
        return Ok(None);
    }
    let sequence = annotate(StructureKind::Tree, retained);
    info!(
        primary = %selection.primary_name,
        raw_events = events.len(),
        snapshots = sequence.snapshots.len(),
        "reconciled tree log"
    );
    Ok(Some(TreeReconciliation {
        primary_entity: selection.primary_name,
        sequence,
    }))
}

/// Digest of a raw log, used as the memoization key.
fn log_digest(events: &[TraceEvent]) -> Result<String> {
    let bytes = serde_json::to_vec(events).map_err(|e| {
        crate::errors::TraceError::new(crate::errors::TraceErrorKind::Serialization)
            .with_op("log_digest")
            .with_message(format!("failed to serialize log for digest: {}", e))
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone)]
enum CachedResult {
    Flat(Reconciliation),
    Tree(Option<TreeReconciliation>),
}

/// Stateful front door over the pure entry points.
///
/// Owns the config and edit classifier, and memoizes the most recent
/// result per family keyed on a SHA-256 digest of the input log. A new
/// log triggers a full, independent recomputation; nothing is patched
/// incrementally.
pub struct Reconciler {
    config: ReconcileConfig,
    classifier: Box<dyn EditClassifier>,
    memo: BTreeMap<&'static str, (String, CachedResult)>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("config", &self.config)
            .field("memoized_families", &self.memo.len())
            .finish()
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(ReconcileConfig::default())
    }
}

impl Reconciler {
    /// Create a reconciler with the default substring classifier.
    pub fn new(config: ReconcileConfig) -> Self {
        Self {
            config,
            classifier: Box::new(HeuristicClassifier),
            memo: BTreeMap::new(),
        }
    }

    /// Replace the edit classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn EditClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconcile an array-family log, reusing the previous result when the
    /// log is unchanged.
    pub fn arrays(&mut self, events: &[TraceEvent]) -> Result<Reconciliation> {
        let digest = log_digest(events)?;
        if let Some((cached_digest, CachedResult::Flat(result))) = self.memo.get("arrays") {
            if *cached_digest == digest {
                return Ok(result.clone());
            }
        }
        let result = reconcile_arrays(events)?;
        self.memo
            .insert("arrays", (digest, CachedResult::Flat(result.clone())));
        Ok(result)
    }

    /// Reconcile a graph-family log, reusing the previous result when the
    /// log is unchanged.
    pub fn graphs(&mut self, events: &[TraceEvent]) -> Result<Reconciliation> {
        let digest = log_digest(events)?;
        if let Some((cached_digest, CachedResult::Flat(result))) = self.memo.get("graphs") {
            if *cached_digest == digest {
                return Ok(result.clone());
            }
        }
        let result = reconcile_graphs(events)?;
        self.memo
            .insert("graphs", (digest, CachedResult::Flat(result.clone())));
        Ok(result)
    }

    /// Reconcile a tree-family log, reusing the previous result when the
    /// log is unchanged.
    pub fn trees(&mut self, events: &[TraceEvent]) -> Result<Option<TreeReconciliation>> {
        let digest = log_digest(events)?;
        if let Some((cached_digest, CachedResult::Tree(result))) = self.memo.get("trees") {
            if *cached_digest == digest {
                return Ok(result.clone());
            }
        }
        let result = reconcile_trees(events, &self.config, self.classifier.as_ref())?;
        self.memo
            .insert("trees", (digest, CachedResult::Tree(result.clone())));
        Ok(result)
    }
}
