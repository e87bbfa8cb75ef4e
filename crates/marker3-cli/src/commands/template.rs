//! Template command implementation
//!
//! Prints or writes the default marker configuration as a starting point.

use anyhow::{Context, Result};
use colored::Colorize;
use marker3_spec::MarkerConfig;
use std::path::Path;
use std::process::ExitCode;

use crate::input::write_document;

/// Run the template command
///
/// # Arguments
/// * `out` - File to write; stdout when absent
pub fn run(out: Option<&str>) -> Result<ExitCode> {
    let json = MarkerConfig::default()
        .to_json_pretty()
        .context("Failed to serialize default config")?;

    match out {
        Some(path) => {
            write_document(Path::new(path), &json)
                .with_context(|| format!("Failed to write template: {}", path))?;
            println!("{} {}", "Template written to:".dimmed(), path);
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}
