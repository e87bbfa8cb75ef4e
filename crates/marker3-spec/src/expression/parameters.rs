//! Fixed-size expression parameter table.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MarkerError, MarkerResult};

/// Number of slots in a freshly created parameter table.
pub const DEFAULT_PARAMETER_SLOTS: usize = 16;

/// Value type synced for an expression parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionValueKind {
    #[default]
    Int,
    Float,
    Bool,
}

/// One slot of the table. A slot whose name is blank is free.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpressionParameter {
    pub name: String,
    #[serde(default)]
    pub kind: ExpressionValueKind,
}

impl ExpressionParameter {
    pub fn is_free(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Synced parameters exposed to expression menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpressionParameters {
    pub slots: Vec<ExpressionParameter>,
}

impl Default for ExpressionParameters {
    fn default() -> Self {
        Self::with_slots(DEFAULT_PARAMETER_SLOTS)
    }
}

impl ExpressionParameters {
    /// Creates a table of `count` free slots.
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![ExpressionParameter::default(); count],
        }
    }

    /// Slot index holding `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|p| p.name == name)
    }

    /// Index of the first free slot.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(ExpressionParameter::is_free)
    }

    /// Slot `claim` would use for `name`, without changing anything.
    pub fn slot_for(&self, name: &str) -> MarkerResult<usize> {
        self.find(name)
            .or_else(|| self.first_free())
            .ok_or_else(|| MarkerError::ParametersExhausted {
                name: name.to_string(),
                slots: self.slots.len(),
            })
    }

    /// Puts `name` in a slot: the slot already holding it, else the first
    /// free slot. Fails when every slot holds another name.
    pub fn claim(&mut self, name: &str, kind: ExpressionValueKind) -> MarkerResult<usize> {
        let index = self.slot_for(name)?;
        debug!("expression parameter '{}' in slot {}", name, index);
        let slot = &mut self.slots[index];
        slot.name = name.to_string();
        slot.kind = kind;
        Ok(index)
    }
}
