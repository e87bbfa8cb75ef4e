//! Colored terminal output shared by the commands.

use anyhow::{Context, Result};
use colored::Colorize;
use marker3_spec::{
    LayerChange, LayerOutcome, MarkerError, ValidationError, ValidationWarning,
};
use std::process::ExitCode;

use super::json_output::{
    marker_error_to_json, validation_warning_to_json, InstallOutput, InstallResult, JsonWarning,
};

pub(crate) fn print_errors(errors: &[ValidationError]) {
    if errors.is_empty() {
        return;
    }
    println!("\n{}", "Errors:".red().bold());
    for error in errors {
        let path_info = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code.to_string().red(),
            path_info.dimmed(),
            error.message
        );
    }
}

pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        let path_info = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code.to_string().yellow(),
            path_info.dimmed(),
            warning.message
        );
    }
}

/// Prints a library error and returns the failure exit code.
pub(crate) fn print_marker_error(err: &MarkerError) -> ExitCode {
    match err {
        MarkerError::Configuration { errors } => {
            print_errors(errors);
            println!(
                "\n{} Config has {} error(s)",
                "FAILED".red().bold(),
                errors.len()
            );
        }
        other => {
            println!(
                "\n{} [{}] {}",
                "FAILED".red().bold(),
                other.code().red(),
                other
            );
        }
    }
    ExitCode::from(1)
}

pub(crate) fn print_layer_changes(changes: &[LayerChange], committed: bool) {
    println!("\n{}", "Layers:".bold());
    for change in changes {
        match change.outcome {
            LayerOutcome::Added => {
                let verb = if committed { "added" } else { "will add" };
                println!("  {} {} ({})", "+".green(), change.name, verb.dimmed());
            }
            LayerOutcome::AlreadyPresent => {
                println!(
                    "  {} {} ({})",
                    "=".dimmed(),
                    change.name,
                    "already present".dimmed()
                );
            }
        }
    }
}

pub(crate) fn print_install_summary(result: &InstallResult) {
    if result.parameters_added.is_empty() {
        println!("{} {}", "Parameters:".dimmed(), "none added".dimmed());
    } else {
        println!(
            "{} {}",
            "Parameters:".dimmed(),
            result.parameters_added.join(", ")
        );
    }
    println!(
        "{} slot {}",
        "Expression parameter:".dimmed(),
        result.expression_slot
    );
    let control = if result.menu_control_added {
        "toggle control"
    } else {
        "toggle already present"
    };
    println!("{} {} ({})", "Menu:".dimmed(), result.menu_path, control);
    println!("{} {}", "Clips:".dimmed(), result.clips.join(", "));
    println!(
        "{} {}",
        "Controller hash:".dimmed(),
        &result.controller_hash[..16]
    );
}

pub(crate) fn warnings_to_json(warnings: &[ValidationWarning]) -> Vec<JsonWarning> {
    warnings.iter().map(validation_warning_to_json).collect()
}

/// Prints an install document and returns the matching exit code.
pub(crate) fn emit_install_json(output: &InstallOutput) -> Result<ExitCode> {
    let json =
        serde_json::to_string_pretty(output).context("Failed to serialize install output")?;
    println!("{}", json);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

pub(crate) fn marker_failure(
    err: &MarkerError,
    config_hash: String,
    avatar_hash: String,
) -> InstallOutput {
    InstallOutput::failure(
        marker_error_to_json(err),
        Some(config_hash),
        Some(avatar_hash),
    )
}
