//! Steps command
//!
//! Usage: tracelens steps --input <LOG> --family <array|tree|graph>
//!        [--format <json|summary>] [--shrink-tolerance <F>]

use super::input::{load_events, write_output, Family, Format};
use clap::Args;
use std::path::PathBuf;
use tracelens_core::summary::{render_reconciliation_summary, render_tree_summary};
use tracelens_core::{
    reconcile_arrays, reconcile_graphs, reconcile_trees, HeuristicClassifier, ReconcileConfig,
};

#[derive(Debug, Args)]
pub struct StepsArgs {
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

/// Execute steps command
pub fn execute(args: StepsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_events(&args.input, args.family)?;

    let rendered = match args.family {
        Family::Array => {
            let result = reconcile_arrays(&events)?;
            match args.format {
                Format::Json => serde_json::to_string_pretty(&result)?,
                Format::Summary => render_reconciliation_summary(&result),
            }
        }
        Family::Graph => {
            let result = reconcile_graphs(&events)?;
            match args.format {
                Format::Json => serde_json::to_string_pretty(&result)?,
                Format::Summary => render_reconciliation_summary(&result),
            }
        }
        Family::Tree => {
            let config = ReconcileConfig {
                shrink_tolerance: args.shrink_tolerance,
            };
            let result = reconcile_trees(&events, &config, &HeuristicClassifier)?;
            match (args.format, result) {
                (Format::Json, result) => serde_json::to_string_pretty(&result)?,
                (Format::Summary, Some(result)) => render_tree_summary(&result),
                (Format::Summary, None) => "No usable tree content in this log.\n".to_string(),
            }
        }
    };

    write_output(args.output.as_deref(), &rendered)
}
