//! Test fixture utilities for avatars and on-disk projects.

use marker3_spec::{AnimatorController, Avatar, Control, MarkerConfig, MenuId, MENU_CAPACITY};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An avatar with an empty FX controller and default expression assets.
pub fn empty_avatar() -> Avatar {
    Avatar {
        fx_controller: AnimatorController::new("FX"),
        ..Default::default()
    }
}

/// An avatar whose root menu has no free control slot.
pub fn full_menu_avatar() -> Avatar {
    let mut avatar = empty_avatar();
    let root = avatar.expression_menus.root;
    for i in 0..MENU_CAPACITY {
        avatar
            .expression_menus
            .add_control(
                root,
                Control::Button {
                    name: format!("Emote {}", i),
                    parameter: Some("VRCEmote".into()),
                    value: i as i32,
                },
            )
            .expect("Failed to fill root menu");
    }
    avatar
}

/// An avatar with a `Props` submenu that links back to the root.
///
/// Returns the avatar and the id of the `Props` menu.
pub fn avatar_with_props_menu() -> (Avatar, MenuId) {
    let mut avatar = empty_avatar();
    let menus = &mut avatar.expression_menus;
    let root = menus.root;
    let props = menus.add_menu("Props");
    menus
        .add_submenu(root, "Props", props)
        .expect("Failed to link Props");
    menus
        .add_submenu(props, "Back", root)
        .expect("Failed to link Back");
    (avatar, props)
}

/// A temporary project holding a config and an avatar document.
pub struct ProjectFixture {
    pub root: TempDir,
    pub config_path: PathBuf,
    pub avatar_path: PathBuf,
}

impl ProjectFixture {
    /// Writes `config` and `avatar` into a fresh temporary directory.
    pub fn new(config: &MarkerConfig, avatar: &Avatar) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let config_path = root.path().join("marker.json");
        let avatar_path = root.path().join("avatar.json");
        fs::write(
            &config_path,
            config.to_json_pretty().expect("Failed to serialize config"),
        )
        .expect("Failed to write config");
        fs::write(
            &avatar_path,
            avatar.to_json_pretty().expect("Failed to serialize avatar"),
        )
        .expect("Failed to write avatar");
        Self {
            root,
            config_path,
            avatar_path,
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn config(&self) -> &str {
        self.config_path.to_str().expect("non-UTF-8 temp path")
    }

    pub fn avatar(&self) -> &str {
        self.avatar_path.to_str().expect("non-UTF-8 temp path")
    }

    /// Reads the avatar document back from disk.
    pub fn read_avatar(&self) -> Avatar {
        let json = fs::read_to_string(&self.avatar_path).expect("Failed to read avatar");
        Avatar::from_json(&json).expect("Failed to parse avatar")
    }
}
