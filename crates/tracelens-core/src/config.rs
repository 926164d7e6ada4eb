//! Engine configuration.

/// Tunables for a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileConfig {
    /// Fraction of the maximum node count seen so far below which a
    /// non-modification, non-final-state tree snapshot is presumed to be a
    /// partially-assembled mid-construction artifact and discarded.
    ///
    /// A heuristic, not an exact rule: lowering it keeps more shrink edits
    /// at the cost of more construction noise, raising it the reverse.
    pub shrink_tolerance: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            shrink_tolerance: 0.9,
        }
    }
}
