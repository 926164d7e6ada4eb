//! TraceLens CLI
//!
//! Command-line interface for the trace reconciliation engine.

use clap::{Parser, Subcommand};
use tracelens_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "tracelens")]
#[command(about = "TraceLens - Trace reconciliation and structural diffing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile a trace log into per-entity snapshot steps
    Steps(commands::steps::StepsArgs),
    /// Merge a reconciled trace log into a cross-entity timeline
    Timeline(commands::timeline::TimelineArgs),
}

fn main() {
    logging_facility::init(Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Steps(args) => commands::steps::execute(args),
        Commands::Timeline(args) => commands::timeline::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
