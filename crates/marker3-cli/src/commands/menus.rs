//! Menus command implementation
//!
//! Lists every expression menu reachable from the root with its remaining
//! room, so a config can pick a target menu.

use anyhow::{Context, Result};
use colored::Colorize;
use marker3_spec::install::menu_label;
use marker3_spec::ExpressionMenus;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{input_error_to_json, MenuEntry, MenusOutput};
use crate::input::load_avatar;

/// Run the menus command
///
/// # Arguments
/// * `avatar_path` - Path to the avatar document (JSON)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
pub fn run(avatar_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(avatar_path)
    } else {
        run_human(avatar_path)
    }
}

fn run_human(avatar_path: &str) -> Result<ExitCode> {
    let avatar = load_avatar(Path::new(avatar_path))
        .with_context(|| format!("Failed to load avatar file: {}", avatar_path))?;

    println!("{} {}", "Menus:".cyan().bold(), avatar_path);
    for entry in menu_entries(&avatar.value.expression_menus) {
        let room = if entry.room > 0 {
            format!("{} free", entry.room).green()
        } else {
            "full".red()
        };
        println!("  {} {} ({})", entry.path, entry.name.dimmed(), room);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_json(avatar_path: &str) -> Result<ExitCode> {
    let output = match load_avatar(Path::new(avatar_path)) {
        Ok(avatar) => MenusOutput {
            success: true,
            errors: Vec::new(),
            menus: menu_entries(&avatar.value.expression_menus),
        },
        Err(e) => MenusOutput {
            success: false,
            errors: vec![input_error_to_json(&e)],
            menus: Vec::new(),
        },
    };

    let json =
        serde_json::to_string_pretty(&output).context("Failed to serialize menus output")?;
    println!("{}", json);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn menu_entries(menus: &ExpressionMenus) -> Vec<MenuEntry> {
    menus
        .locations()
        .into_iter()
        .map(|location| MenuEntry {
            id: location.id.0,
            name: menus
                .menu(location.id)
                .map(|m| m.name.clone())
                .unwrap_or_default(),
            path: menu_label(&location.path),
            room: location.room,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker3_spec::{AnimatorController, Avatar, MENU_CAPACITY};
    use pretty_assertions::assert_eq;

    #[test]
    fn entries_follow_submenus_and_stop_at_cycles() {
        let mut menus = ExpressionMenus::default();
        let props = menus.add_menu("Props");
        menus.add_submenu(menus.root, "Props", props).unwrap();
        menus.add_submenu(props, "Back", menus.root).unwrap();

        let entries = menu_entries(&menus);
        assert_eq!(
            entries,
            vec![
                MenuEntry {
                    id: 0,
                    name: "Expressions Menu".into(),
                    path: "/".into(),
                    room: MENU_CAPACITY - 1,
                },
                MenuEntry {
                    id: 1,
                    name: "Props".into(),
                    path: "/Props".into(),
                    room: MENU_CAPACITY - 1,
                },
            ]
        );
    }

    #[test]
    fn menus_command_reads_avatar() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("avatar.json");
        let avatar = Avatar {
            fx_controller: AnimatorController::new("FX"),
            ..Default::default()
        };
        std::fs::write(&path, avatar.to_json_pretty().unwrap()).unwrap();

        let path = path.to_str().unwrap();
        assert_eq!(run(path, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(path, true).unwrap(), ExitCode::SUCCESS);
    }
}
