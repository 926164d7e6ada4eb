//! Timeline command
//!
//! Usage: tracelens timeline --input <LOG> --family <array|tree|graph>
//!        [--format <json|summary>]

use super::input::{load_events, write_output, Family, Format};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracelens_core::model::content::StructureKind;
use tracelens_core::timeline::{merge_timeline, MergedTimeline};
use tracelens_core::{
    reconcile_arrays, reconcile_graphs, reconcile_trees, HeuristicClassifier, ReconcileConfig,
    Reconciliation,
};

#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Path to the JSON trace log
    #[arg(short, long)]
    pub input: PathBuf,

    /// Structure family to reconcile the log as
    #[arg(long, value_enum)]
    pub family: Family,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Node-count fraction below which a non-edit tree snapshot is
    /// discarded as construction noise
    #[arg(long, default_value_t = 0.9)]
    pub shrink_tolerance: f64,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute timeline command
pub fn execute(args: TimelineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_events(&args.input, args.family)?;

    let reconciliation = match args.family {
        Family::Array => reconcile_arrays(&events)?,
        Family::Graph => reconcile_graphs(&events)?,
        Family::Tree => {
            // The tree pipeline yields a single primary entity; its timeline
            // is a one-row merge.
            let config = ReconcileConfig {
                shrink_tolerance: args.shrink_tolerance,
            };
            let mut entities = BTreeMap::new();
            if let Some(tree) = reconcile_trees(&events, &config, &HeuristicClassifier)? {
                entities.insert(tree.primary_entity.clone(), tree.sequence);
            }
            Reconciliation {
                kind: StructureKind::Tree,
                entities,
            }
        }
    };

    let timeline = merge_timeline(&reconciliation);
    let rendered = match args.format {
        Format::Json => serde_json::to_string_pretty(&timeline)?,
        Format::Summary => render_timeline_summary(&timeline),
    };
    write_output(args.output.as_deref(), &rendered)
}

/// Render a merged timeline as a Markdown table: one column per
/// significant timestamp, one row per entity.
fn render_timeline_summary(timeline: &MergedTimeline) -> String {
    if timeline.timestamps.is_empty() {
        return "No snapshots to merge in this log.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("| entity |");
    for mark in &timeline.timestamps {
        out.push_str(&format!(" t={} |", mark.0));
    }
    out.push('\n');
    out.push_str("|---|");
    for _ in &timeline.timestamps {
        out.push_str("---|");
    }
    out.push('\n');

    for row in &timeline.rows {
        out.push_str(&format!("| `{}` |", row.entity_name));
        for cell in &row.cells {
            match cell {
                Some(cell) if cell.carried_forward => {
                    out.push_str(&format!(" step {} (carried) |", cell.step_number));
                }
                Some(cell) => out.push_str(&format!(" step {} |", cell.step_number)),
                None => out.push_str("  |"),
            }
        }
        out.push('\n');
    }
    out
}
