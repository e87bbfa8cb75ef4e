//! Plan command implementation
//!
//! Prepares an install against an avatar and prints what would change.
//! Nothing is written.

use anyhow::{Context, Result};
use colored::Colorize;
use marker3_spec::install::menu_label;
use marker3_spec::{InstallPlan, LayerOutcome};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{input_error_to_json, InstallOutput, InstallResult};
use super::reporting;
use crate::input::{load_avatar, load_config};

/// Run the plan command
///
/// # Arguments
/// * `config_path` - Path to the marker configuration (JSON)
/// * `avatar_path` - Path to the avatar document (JSON)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if the install would succeed, 1 otherwise
pub fn run(config_path: &str, avatar_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path, avatar_path)
    } else {
        run_human(config_path, avatar_path)
    }
}

fn run_human(config_path: &str, avatar_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Planning:".cyan().bold(), avatar_path);

    let config = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    let avatar = load_avatar(Path::new(avatar_path))
        .with_context(|| format!("Failed to load avatar file: {}", avatar_path))?;
    println!(
        "{} config {} avatar {}",
        "Source:".dimmed(),
        &config.source_hash[..16],
        &avatar.source_hash[..16]
    );

    let plan = match InstallPlan::prepare(&config.value, &avatar.value) {
        Ok(plan) => plan,
        Err(e) => return Ok(reporting::print_marker_error(&e)),
    };

    let result = plan_result(&plan);
    reporting::print_layer_changes(plan.layer_changes(), false);
    reporting::print_install_summary(&result);
    reporting::print_warnings(plan.warnings());

    println!(
        "\n{} Install is ready ({} layer(s) to add)",
        "SUCCESS".green().bold(),
        plan.layer_changes()
            .iter()
            .filter(|c| c.outcome == LayerOutcome::Added)
            .count()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(config_path: &str, avatar_path: &str) -> Result<ExitCode> {
    let config = match load_config(Path::new(config_path)) {
        Ok(c) => c,
        Err(e) => {
            let output = InstallOutput::failure(vec![input_error_to_json(&e)], None, None);
            return reporting::emit_install_json(&output);
        }
    };
    let avatar = match load_avatar(Path::new(avatar_path)) {
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

    let output = match InstallPlan::prepare(&config.value, &avatar.value) {
        Ok(plan) => InstallOutput::success(
            plan_result(&plan),
            config.source_hash,
            avatar.source_hash,
            reporting::warnings_to_json(plan.warnings()),
        ),
        Err(e) => reporting::marker_failure(&e, config.source_hash, avatar.source_hash),
    };
    reporting::emit_install_json(&output)
}

/// Summarizes a prepared plan.
pub(crate) fn plan_result(plan: &InstallPlan) -> InstallResult {
    InstallResult {
        committed: false,
        layers: plan.layer_changes().to_vec(),
        parameters_added: plan
            .new_parameters()
            .iter()
            .map(|p| p.name.clone())
            .collect(),
        expression_slot: plan.expression_slot(),
        menu_path: menu_label(plan.menu_path()),
        menu_control_added: plan.adds_menu_control(),
        clips: plan.clips().iter().map(|(_, c)| c.name.clone()).collect(),
        controller_hash: plan.controller_hash().to_string(),
        avatar_path: None,
        clip_files: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker3_spec::{AnimatorController, Avatar, MarkerConfig};

    fn write_inputs(dir: &tempfile::TempDir, config: &MarkerConfig) -> (String, String) {
        let config_path = dir.path().join("marker.json");
        std::fs::write(&config_path, config.to_json_pretty().unwrap()).unwrap();

        let avatar = Avatar {
            fx_controller: AnimatorController::new("FX"),
            ..Default::default()
        };
        let avatar_path = dir.path().join("avatar.json");
        std::fs::write(&avatar_path, avatar.to_json_pretty().unwrap()).unwrap();

        (
            config_path.to_str().unwrap().to_string(),
            avatar_path.to_str().unwrap().to_string(),
        )
    }

    #[test]
    fn plan_leaves_avatar_file_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let (config, avatar) = write_inputs(&tmp, &MarkerConfig::default());
        let before = std::fs::read_to_string(&avatar).unwrap();

        assert_eq!(run(&config, &avatar, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(&config, &avatar, true).unwrap(), ExitCode::SUCCESS);
        assert_eq!(std::fs::read_to_string(&avatar).unwrap(), before);
    }

    #[test]
    fn plan_fails_for_unknown_menu() {
        let tmp = tempfile::tempdir().unwrap();
        let config = MarkerConfig::builder().submenu("Nowhere").build();
        let (config, avatar) = write_inputs(&tmp, &config);
        assert_eq!(run(&config, &avatar, false).unwrap(), ExitCode::from(1));
        assert_eq!(run(&config, &avatar, true).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn plan_result_lists_clips_and_parameters() {
        let avatar = Avatar {
            fx_controller: AnimatorController::new("FX"),
            ..Default::default()
        };
        let plan = InstallPlan::prepare(&MarkerConfig::default(), &avatar).unwrap();
        let result = plan_result(&plan);

        assert!(!result.committed);
        assert_eq!(result.parameters_added, vec!["GestureRight", "ToggleMarker"]);
        assert_eq!(result.clips.len(), 4);
        assert!(result.clips.contains(&"Drawing".to_string()));
        assert_eq!(result.menu_path, "/");
    }
}
