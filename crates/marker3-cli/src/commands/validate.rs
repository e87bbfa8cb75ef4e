//! Validate command implementation
//!
//! Checks a marker configuration without touching any avatar.

use anyhow::{Context, Result};
use colored::Colorize;
use marker3_spec::install::menu_label;
use marker3_spec::{validate_config, MarkerConfig};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, validation_error_to_json, ValidateOutput, ValidateResult,
};
use super::reporting;
use crate::input::{load_config, Loaded};

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the marker configuration (JSON)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path)
    } else {
        run_human(config_path)
    }
}

fn run_human(config_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), config_path);

    let Loaded {
        value: config,
        source_hash,
    } = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    println!("{} {}", "Source:".dimmed(), &source_hash[..16]);

    let result = validate_config(&config);
    reporting::print_errors(&result.errors);
    reporting::print_warnings(&result.warnings);

    if result.is_ok() {
        println!(
            "\n{} {} drives {} and {}",
            "SUCCESS".green().bold(),
            config.watched_parameter(),
            config.gesture_layer_name(),
            config.toggle_layer
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Config has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(config_path: &str) -> Result<ExitCode> {
    let output = match load_config(Path::new(config_path)) {
        Ok(Loaded {
            value: config,
            source_hash,
        }) => {
            let result = validate_config(&config);
            let warnings = reporting::warnings_to_json(&result.warnings);
            if result.is_ok() {
                ValidateOutput::success(summarize(&config), source_hash, warnings)
            } else {
                let errors = result.errors.iter().map(validation_error_to_json).collect();
                ValidateOutput::failure(errors, warnings, Some(source_hash))
            }
        }
        Err(e) => ValidateOutput::failure(vec![input_error_to_json(&e)], vec![], None),
    };

    let json = serde_json::to_string_pretty(&output)
        .context("Failed to serialize validate output")?;
    println!("{}", json);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn summarize(config: &MarkerConfig) -> ValidateResult {
    ValidateResult {
        watched_parameter: config.watched_parameter().to_string(),
        gesture_layer: config.gesture_layer_name(),
        toggle_layer: config.toggle_layer.clone(),
        toggle_parameter: config.toggle_parameter.clone(),
        activate: config.activate_gesture.value(),
        reset: config.reset_gesture.value(),
        trigger_count: config.trigger_count,
        menu_path: menu_label(&config.menu),
    }
}
