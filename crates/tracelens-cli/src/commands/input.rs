//! Trace log loading.
//!
//! Two accepted layouts: a bare JSON array of events, or the tracer
//! backend's envelope `{"arrays": [...], "trees": [...], "graphs": [...]}`
//! where each family key holds its own event list.

use clap::ValueEnum;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::Path;
use tracelens_core::TraceEvent;

/// Structure family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Family {
    /// Ordered sequences of scalars.
    Array,
    /// Binary or n-ary trees.
    Tree,
    /// Adjacency-list graphs.
    Graph,
}

impl Family {
    /// Envelope key holding this family's event list.
    fn envelope_key(&self) -> &'static str {
        match self {
            Family::Array => "arrays",
            Family::Tree => "trees",
            Family::Graph => "graphs",
        }
    }
}

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Structured JSON output.
    Json,
    /// Human-readable Markdown summary.
    Summary,
}

/// Load the events of one family from a trace log file.
pub fn load_events(path: &Path, family: Family) -> Result<Vec<TraceEvent>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    let events = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        Value::Object(mut envelope) => match envelope.remove(family.envelope_key()) {
            Some(list) => serde_json::from_value(list)?,
            // An envelope without this family's key is an empty log.
            None => Vec::new(),
        },
        _ => {
            return Err(format!(
                "{}: expected a JSON event array or a family envelope",
                path.display()
            )
            .into())
        }
    };
    Ok(events)
}

/// Write `rendered` to `output`, or to stdout when no path was given.
pub fn write_output(output: Option<&Path>, rendered: &str) -> Result<(), Box<dyn Error>> {
    if let Some(path) = output {
        fs::write(path, rendered)?;
        println!("Wrote {}", path.display());
    } else {
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
