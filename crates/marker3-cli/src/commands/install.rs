//! Install command implementation
//!
//! Prepares and commits an install, then writes the updated avatar
//! document and, optionally, the synthesized clips.

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use marker3_spec::install::menu_label;
use marker3_spec::{Avatar, InstallPlan, InstallReport, MarkerConfig, MarkerError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{
    error_codes, input_error_to_json, InstallOutput, InstallResult, JsonError,
};
use super::reporting;
use crate::input::{load_avatar, load_config, write_document, InputError};

/// Run the install command
///
/// # Arguments
/// * `config_path` - Path to the marker configuration (JSON)
/// * `avatar_path` - Path to the avatar document (JSON)
/// * `out` - Where to write the updated avatar (default: `avatar_path`)
/// * `clips_dir` - Directory to write one JSON file per clip into
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 if the install was rejected
pub fn run(
    config_path: &str,
    avatar_path: &str,
    out: Option<&str>,
    clips_dir: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let out_path = Path::new(out.unwrap_or(avatar_path));
    let clips_dir = clips_dir.map(Path::new);
    if json_output {
        run_json(config_path, avatar_path, out_path, clips_dir)
    } else {
        run_human(config_path, avatar_path, out_path, clips_dir)
    }
}

fn run_human(
    config_path: &str,
    avatar_path: &str,
    out_path: &Path,
    clips_dir: Option<&Path>,
) -> Result<ExitCode> {
    println!("{} {}", "Installing:".cyan().bold(), avatar_path);

    let config = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    let mut avatar = load_avatar(Path::new(avatar_path))
        .with_context(|| format!("Failed to load avatar file: {}", avatar_path))?;

    let report = match apply(&config.value, &mut avatar.value) {
        Ok(report) => report,
        Err(e) => return Ok(reporting::print_marker_error(&e)),
    };

    let clip_files = write_outputs(&avatar.value, &report, out_path, clips_dir)
        .with_context(|| format!("Failed to write install outputs to {}", out_path.display()))?;

    let result = install_result(&report, out_path, &clip_files);
    reporting::print_layer_changes(&report.layers, true);
    reporting::print_install_summary(&result);
    reporting::print_warnings(&report.warnings);

    println!("\n{} {}", "Avatar written to:".dimmed(), out_path.display());
    for file in &clip_files {
        println!("{} {}", "Clip written to:".dimmed(), file.display());
    }
    println!("\n{} Marker installed", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

fn run_json(
    config_path: &str,
    avatar_path: &str,
    out_path: &Path,
    clips_dir: Option<&Path>,
) -> Result<ExitCode> {
    let config = match load_config(Path::new(config_path)) {
        Ok(c) => c,
        Err(e) => {
            let output = InstallOutput::failure(vec![input_error_to_json(&e)], None, None);
            return reporting::emit_install_json(&output);
        }
    };
    let mut avatar = match load_avatar(Path::new(avatar_path)) {
        Ok(a) => a,
        Err(e) => {
            let output = InstallOutput::failure(
                vec![input_error_to_json(&e)],
                Some(config.source_hash),
                None,
            );
            return reporting::emit_install_json(&output);
        }
    };

    let report = match apply(&config.value, &mut avatar.value) {
        Ok(report) => report,
        Err(e) => {
            let output = reporting::marker_failure(&e, config.source_hash, avatar.source_hash);
            return reporting::emit_install_json(&output);
        }
    };

    let output = match write_outputs(&avatar.value, &report, out_path, clips_dir) {
        Ok(clip_files) => InstallOutput::success(
            install_result(&report, out_path, &clip_files),
            config.source_hash,
            avatar.source_hash,
            reporting::warnings_to_json(&report.warnings),
        ),
        Err(e) => InstallOutput::failure(
            vec![write_error_to_json(&e)],
            Some(config.source_hash),
            Some(avatar.source_hash),
        ),
    };
    reporting::emit_install_json(&output)
}

fn apply(config: &MarkerConfig, avatar: &mut Avatar) -> Result<InstallReport, MarkerError> {
    InstallPlan::prepare(config, avatar)?.commit(avatar)
}

/// Failure while persisting the committed install.
#[derive(Debug)]
enum WriteError {
    Serialize(serde_json::Error),
    Io(InputError),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::Serialize(e) => write!(f, "failed to serialize document: {}", e),
            WriteError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WriteError {}

fn write_error_to_json(err: &WriteError) -> JsonError {
    match err {
        WriteError::Serialize(_) => JsonError::new(error_codes::JSON_SERIALIZE, err.to_string()),
        WriteError::Io(e) => input_error_to_json(e),
    }
}

/// Writes the avatar and clips; returns the clip files written.
fn write_outputs(
    avatar: &Avatar,
    report: &InstallReport,
    out_path: &Path,
    clips_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, WriteError> {
    let json = avatar.to_json_pretty().map_err(WriteError::Serialize)?;
    write_document(out_path, &json).map_err(WriteError::Io)?;
    debug!("wrote avatar to {}", out_path.display());

    let mut written = Vec::new();
    if let Some(dir) = clips_dir {
        for (_, clip) in report.clips.iter() {
            let path = dir.join(format!("{}.json", clip.name));
            let json = serde_json::to_string_pretty(clip).map_err(WriteError::Serialize)?;
            write_document(&path, &json).map_err(WriteError::Io)?;
            debug!("wrote clip {} to {}", clip.name, path.display());
            written.push(path);
        }
    }
    Ok(written)
}

fn install_result(report: &InstallReport, out_path: &Path, clip_files: &[PathBuf]) -> InstallResult {
    InstallResult {
        committed: true,
        layers: report.layers.clone(),
        parameters_added: report.parameters_added.clone(),
        expression_slot: report.expression_slot,
        menu_path: menu_label(&report.menu_path),
        menu_control_added: report.menu_control_added,
        clips: report.clips.iter().map(|(_, c)| c.name.clone()).collect(),
        controller_hash: report.controller_hash.clone(),
        avatar_path: Some(out_path.display().to_string()),
        clip_files: clip_files
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    }
}
