//! Expression menus as an arena of menus linked by submenu controls.
//!
//! Submenu links may form cycles. Traversal keeps the set of menus on the
//! current path and never descends into one of them, so every walk
//! terminates.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MarkerError, MarkerResult};

/// Maximum number of controls in one menu.
pub const MENU_CAPACITY: usize = 8;

/// Index of a menu in an [`ExpressionMenus`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub usize);

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A menu entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Sets `parameter` to `value` while pressed.
    Button {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameter: Option<String>,
        #[serde(default)]
        value: i32,
    },
    /// Latches `parameter` to `value` until pressed again.
    Toggle {
        name: String,
        parameter: String,
        value: i32,
    },
    /// Opens another menu.
    SubMenu { name: String, menu: MenuId },
}

impl Control {
    pub fn name(&self) -> &str {
        match self {
            Control::Button { name, .. }
            | Control::Toggle { name, .. }
            | Control::SubMenu { name, .. } => name,
        }
    }
}

/// A single menu page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpressionMenu {
    pub name: String,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl ExpressionMenu {
    /// Free control slots.
    pub fn room(&self) -> usize {
        MENU_CAPACITY.saturating_sub(self.controls.len())
    }

    /// True if a toggle already drives `parameter`.
    pub fn has_toggle_for(&self, parameter: &str) -> bool {
        self.controls
            .iter()
            .any(|c| matches!(c, Control::Toggle { parameter: p, .. } if p == parameter))
    }
}

/// A menu reachable from the root, with the submenu titles leading to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLocation {
    pub id: MenuId,
    /// Submenu control names from the root; empty for the root itself.
    pub path: Vec<String>,
    pub room: usize,
}

impl MenuLocation {
    pub fn has_room(&self) -> bool {
        self.room > 0
    }
}

/// Arena of menus with a designated root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpressionMenus {
    pub root: MenuId,
    pub menus: Vec<ExpressionMenu>,
}

impl Default for ExpressionMenus {
    fn default() -> Self {
        Self::new("Expressions Menu")
    }
}

impl ExpressionMenus {
    /// Creates an arena holding only an empty root menu.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root: MenuId(0),
            menus: vec![ExpressionMenu {
                name: root_name.into(),
                controls: Vec::new(),
            }],
        }
    }

    /// Adds an unlinked menu and returns its id.
    pub fn add_menu(&mut self, name: impl Into<String>) -> MenuId {
        self.menus.push(ExpressionMenu {
            name: name.into(),
            controls: Vec::new(),
        });
        MenuId(self.menus.len() - 1)
    }

    pub fn menu(&self, id: MenuId) -> Option<&ExpressionMenu> {
        self.menus.get(id.0)
    }

    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut ExpressionMenu> {
        self.menus.get_mut(id.0)
    }

    /// Fails unless `id` exists and has a free control slot.
    pub fn check_room(&self, id: MenuId) -> MarkerResult<()> {
        let menu = self
            .menu(id)
            .ok_or_else(|| MarkerError::UnknownMenu(id.to_string()))?;
        if menu.room() == 0 {
            return Err(MarkerError::CapacityExceeded {
                menu: menu.name.clone(),
                capacity: MENU_CAPACITY,
            });
        }
        Ok(())
    }

    /// Appends a control to a menu, respecting [`MENU_CAPACITY`].
    pub fn add_control(&mut self, id: MenuId, control: Control) -> MarkerResult<()> {
        if let Control::SubMenu { menu, .. } = &control {
            if self.menu(*menu).is_none() {
                return Err(MarkerError::UnknownMenu(menu.to_string()));
            }
        }
        self.check_room(id)?;
        let menu = self
            .menu_mut(id)
            .ok_or_else(|| MarkerError::UnknownMenu(id.to_string()))?;
        debug!("adding control '{}' to menu '{}'", control.name(), menu.name);
        menu.controls.push(control);
        Ok(())
    }

    /// Appends a toggle control driving `parameter` with `value`.
    pub fn add_toggle(
        &mut self,
        id: MenuId,
        name: impl Into<String>,
        parameter: impl Into<String>,
        value: i32,
    ) -> MarkerResult<()> {
        self.add_control(
            id,
            Control::Toggle {
                name: name.into(),
                parameter: parameter.into(),
                value,
            },
        )
    }

    /// Links `child` into `parent` as a submenu control.
    pub fn add_submenu(
        &mut self,
        parent: MenuId,
        name: impl Into<String>,
        child: MenuId,
    ) -> MarkerResult<()> {
        self.add_control(
            parent,
            Control::SubMenu {
                name: name.into(),
                menu: child,
            },
        )
    }

    /// Follows submenu titles from the root. The first submenu control with
    /// a matching name is taken at each step.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<MenuId> {
        let mut current = self.root;
        for title in path {
            let menu = self.menu(current)?;
            current = menu.controls.iter().find_map(|c| match c {
                Control::SubMenu { name, menu } if name == title.as_ref() => Some(*menu),
                _ => None,
            })?;
        }
        self.menu(current).map(|_| current)
    }

    /// Every menu reachable from the root, depth first.
    ///
    /// A menu reached along different acyclic paths is listed once per
    /// path. A submenu link back to a menu already on the current path is
    /// not followed.
    pub fn locations(&self) -> Vec<MenuLocation> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        let mut on_stack = HashSet::new();
        self.walk(self.root, &mut path, &mut on_stack, &mut out);
        out
    }

    fn walk(
        &self,
        id: MenuId,
        path: &mut Vec<String>,
        on_stack: &mut HashSet<MenuId>,
        out: &mut Vec<MenuLocation>,
    ) {
        let Some(menu) = self.menu(id) else {
            return;
        };
        if !on_stack.insert(id) {
            return;
        }

        out.push(MenuLocation {
            id,
            path: path.clone(),
            room: menu.room(),
        });

        for control in &menu.controls {
            if let Control::SubMenu { name, menu: child } = control {
                path.push(name.clone());
                self.walk(*child, path, on_stack, out);
                path.pop();
            }
        }

        on_stack.remove(&id);
    }
}
