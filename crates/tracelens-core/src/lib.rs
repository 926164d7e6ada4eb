//! TraceLens Core - Trace reconciliation and structural diff engine
//!
//! Turns a noisy, unordered-by-entity log of data-structure observations
//! into clean, per-entity chronological snapshot sequences with precise
//! structural diffs between consecutive steps. Covers:
//! - Bookkeeping-event filtering and chronological ordering
//! - Entity grouping with primary-tree resolution
//! - Content dedup and mid-construction noise suppression
//! - Shape-specific differs (array / tree / graph) with canonical
//!   tree-path addressing
//! - Cross-entity timeline merging for comparison views
//!
//! The engine is a pure, synchronous batch computation with no I/O; log
//! acquisition and rendering are external collaborators.

pub mod classify;
pub mod config;
pub mod dedup;
pub mod diff;
pub mod errors;
pub mod filter;
pub mod grouping;
pub mod logging_facility;
pub mod model;
pub mod reconcile;
pub mod summary;
pub mod timeline;

// Re-export commonly used types
pub use classify::{EditClassifier, EditKind, HeuristicClassifier};
pub use config::ReconcileConfig;
pub use diff::{ArrayChanges, ChangeSet, GraphChanges, TreeChanges};
pub use errors::{Result, TraceError, TraceErrorKind};
pub use model::{Operation, Snapshot, StructureContent, StructureKind, Timestamp, TraceEvent};
pub use reconcile::{
    reconcile_arrays, reconcile_graphs, reconcile_trees, Reconciler, Reconciliation,
    TreeReconciliation,
};
pub use timeline::{cell_at, merge_timeline, MergedTimeline, TimelineCell};
