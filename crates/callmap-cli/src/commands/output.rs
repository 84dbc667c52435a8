//! Report output.

use anyhow::Result;
use callmap_core::{report, CallGraph};

use crate::OutputFormat;

/// Print the call graph in the specified format.
pub fn print(graph: &CallGraph, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report::text_report(graph)),
        OutputFormat::Json => println!("{}", report::to_json(graph)?),
    }
    Ok(())
}
