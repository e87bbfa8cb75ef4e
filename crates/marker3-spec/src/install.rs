//! Marker installation as a two-phase prepare/commit.
//!
//! [`InstallPlan::prepare`] validates the configuration, checks menu and
//! expression parameter room, synthesizes clips and builds both layers
//! against a scratch copy of the FX controller. It never touches the
//! avatar. [`InstallPlan::commit`] re-checks room and then applies every
//! change; if a check fails, nothing is written.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::builder::{
    ensure_gesture_layer, ensure_toggle_layer, register_parameter, EnsuredLayer,
    GestureLayerRequest, LayerOutcome, ToggleLayerRequest,
};
use crate::clip::{synthesize_clips, ClipLibrary, ClipSet};
use crate::config::MarkerConfig;
use crate::controller::{AnimatorController, Parameter, ParameterKind};
use crate::error::{MarkerError, MarkerResult, ValidationWarning, WarningCode};
use crate::expression::{ExpressionMenus, ExpressionParameters, ExpressionValueKind, MenuId};
use crate::hash::canonical_controller_hash;
use crate::validation::validate_config;

/// Value the marker menu toggle writes to the toggle parameter.
pub const MARKER_CONTROL_VALUE: i32 = 1;

/// The avatar assets the marker is installed into.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Avatar {
    pub fx_controller: AnimatorController,
    #[serde(default)]
    pub expression_parameters: ExpressionParameters,
    #[serde(default)]
    pub expression_menus: ExpressionMenus,
}

impl Avatar {
    /// Parses an avatar document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the avatar document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// What happened to one generated layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerChange {
    pub name: String,
    pub outcome: LayerOutcome,
}

impl From<EnsuredLayer<'_>> for LayerChange {
    fn from(ensured: EnsuredLayer<'_>) -> Self {
        Self {
            name: ensured.layer.name.clone(),
            outcome: ensured.outcome,
        }
    }
}

/// A fully built, not yet applied, marker installation.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    control_name: String,
    gesture: GestureLayerRequest,
    toggle: ToggleLayerRequest,
    handles: ClipSet,
    new_parameters: Vec<Parameter>,
    layer_changes: Vec<LayerChange>,
    clips: ClipLibrary,
    expression_slot: usize,
    menu: MenuId,
    menu_path: Vec<String>,
    adds_menu_control: bool,
    preview: AnimatorController,
    controller_hash: String,
    warnings: Vec<ValidationWarning>,
}

/// Summary of a committed installation.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub layers: Vec<LayerChange>,
    pub parameters_added: Vec<String>,
    pub expression_slot: usize,
    pub menu_path: Vec<String>,
    pub menu_control_added: bool,
    pub clips: ClipLibrary,
    pub controller_hash: String,
    pub warnings: Vec<ValidationWarning>,
}

/// Parameters and layers one application added to a controller.
struct ControllerChanges {
    parameters_added: Vec<String>,
    layers: Vec<LayerChange>,
}

impl InstallPlan {
    /// Builds everything the installation needs without modifying `avatar`.
    pub fn prepare(config: &MarkerConfig, avatar: &Avatar) -> MarkerResult<Self> {
        let validation = validate_config(config);
        let mut warnings = validation
            .into_result()
            .map_err(MarkerError::configuration)?;

        let menu = avatar
            .expression_menus
            .resolve(&config.menu)
            .ok_or_else(|| MarkerError::UnknownMenu(menu_label(&config.menu)))?;
        let adds_menu_control = !avatar
            .expression_menus
            .menu(menu)
            .is_some_and(|m| m.has_toggle_for(&config.toggle_parameter));
        if adds_menu_control {
            avatar.expression_menus.check_room(menu)?;
        }
        let expression_slot = avatar
            .expression_parameters
            .slot_for(&config.toggle_parameter)?;

        let clips = synthesize_clips(&config.animation_path);
        let handles = clips.handles();
        let gesture = config.gesture_request();
        let toggle = config.toggle_request();

        let mut preview = avatar.fx_controller.clone();
        for name in [gesture.watched_parameter.as_str(), toggle.parameter.as_str()] {
            if let Some(existing) = preview.parameter(name) {
                if existing.kind != ParameterKind::Int {
                    warnings.push(ValidationWarning::new(
                        WarningCode::ParameterTypeMismatch,
                        format!(
                            "parameter '{}' is {}, transitions compare it as int",
                            name, existing.kind
                        ),
                    ));
                }
            }
        }

        let changes = apply_to_controller(&mut preview, &gesture, &toggle, &handles)?;
        warnings.extend(layer_warnings(&changes.layers));

        let controller_hash = canonical_controller_hash(&preview)?;
        debug!(
            "prepared install: {} new parameter(s), {} new layer(s), controller {}",
            changes.parameters_added.len(),
            added_count(&changes.layers),
            &controller_hash[..16]
        );

        Ok(Self {
            control_name: config.control_name.clone(),
            gesture,
            toggle,
            handles,
            new_parameters: changes
                .parameters_added
                .iter()
                .map(Parameter::int)
                .collect(),
            layer_changes: changes.layers,
            clips,
            expression_slot,
            menu,
            menu_path: config.menu.clone(),
            adds_menu_control,
            preview,
            controller_hash,
            warnings,
        })
    }

    /// Applies the plan to `avatar`.
    ///
    /// Parameters and layers are appended only if absent by name, judged
    /// against `avatar` as it is now rather than as it was when prepared.
    /// Menu and expression parameter room are checked again and every change
    /// is staged before anything is written, so a failed commit leaves the
    /// avatar unchanged.
    pub fn commit(self, avatar: &mut Avatar) -> MarkerResult<InstallReport> {
        let adds_menu_control = self.adds_menu_control
            && !avatar
                .expression_menus
                .menu(self.menu)
                .is_some_and(|m| m.has_toggle_for(&self.toggle.parameter));
        if adds_menu_control {
            avatar.expression_menus.check_room(self.menu)?;
        }

        let mut controller = avatar.fx_controller.clone();
        let changes =
            apply_to_controller(&mut controller, &self.gesture, &self.toggle, &self.handles)?;

        let mut expression_parameters = avatar.expression_parameters.clone();
        let expression_slot =
            expression_parameters.claim(&self.toggle.parameter, ExpressionValueKind::Int)?;
        if adds_menu_control {
            avatar.expression_menus.add_toggle(
                self.menu,
                self.control_name.as_str(),
                self.toggle.parameter.as_str(),
                MARKER_CONTROL_VALUE,
            )?;
        }
        avatar.fx_controller = controller;
        avatar.expression_parameters = expression_parameters;

        let controller_hash = canonical_controller_hash(&avatar.fx_controller)?;
        info!(
            "installed marker: {} of [{}] layer(s) added, menu '{}', slot {}",
            added_count(&changes.layers),
            changes
                .layers
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            menu_label(&self.menu_path),
            expression_slot
        );

        let warnings = self
            .warnings
            .into_iter()
            .filter(|w| w.code != WarningCode::LayerAlreadyPresent)
            .chain(layer_warnings(&changes.layers))
            .collect();

        Ok(InstallReport {
            layers: changes.layers,
            parameters_added: changes.parameters_added,
            expression_slot,
            menu_path: self.menu_path,
            menu_control_added: adds_menu_control,
            clips: self.clips,
            controller_hash,
            warnings,
        })
    }

    /// Layers the plan adds or finds already present.
    pub fn layer_changes(&self) -> &[LayerChange] {
        &self.layer_changes
    }

    /// Parameters the plan declares on the controller.
    pub fn new_parameters(&self) -> &[Parameter] {
        &self.new_parameters
    }

    /// Clips to persist alongside the controller.
    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    /// The controller as it will look after commit.
    pub fn preview(&self) -> &AnimatorController {
        &self.preview
    }

    /// Canonical hash of [`Self::preview`].
    pub fn controller_hash(&self) -> &str {
        &self.controller_hash
    }

    /// Expression parameter slot the toggle parameter will occupy.
    pub fn expression_slot(&self) -> usize {
        self.expression_slot
    }

    pub fn menu_path(&self) -> &[String] {
        &self.menu_path
    }

    /// False when the target menu already has a toggle for the parameter.
    pub fn adds_menu_control(&self) -> bool {
        self.adds_menu_control
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }
}

/// Prepares and commits in one call.
pub fn install(config: &MarkerConfig, avatar: &mut Avatar) -> MarkerResult<InstallReport> {
    InstallPlan::prepare(config, avatar)?.commit(avatar)
}

/// Human-readable menu path, `/` for the root.
pub fn menu_label(path: &[String]) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", path.join("/"))
    }
}

/// Declares both watched parameters, then ensures both layers.
fn apply_to_controller(
    controller: &mut AnimatorController,
    gesture: &GestureLayerRequest,
    toggle: &ToggleLayerRequest,
    handles: &ClipSet,
) -> MarkerResult<ControllerChanges> {
    let mut parameters_added = Vec::new();
    for name in [gesture.watched_parameter.as_str(), toggle.parameter.as_str()] {
        if register_parameter(&mut controller.parameters, name, ParameterKind::Int) {
            parameters_added.push(name.to_string());
        }
    }

    let layers = vec![
        LayerChange::from(ensure_gesture_layer(controller, gesture, handles)?),
        LayerChange::from(ensure_toggle_layer(controller, toggle, handles)?),
    ];
    Ok(ControllerChanges {
        parameters_added,
        layers,
    })
}

fn layer_warnings(changes: &[LayerChange]) -> impl Iterator<Item = ValidationWarning> + '_ {
    changes
        .iter()
        .filter(|c| c.outcome == LayerOutcome::AlreadyPresent)
        .map(|c| {
            ValidationWarning::new(
                WarningCode::LayerAlreadyPresent,
                format!("layer '{}' already exists and was left as is", c.name),
            )
        })
}

fn added_count(changes: &[LayerChange]) -> usize {
    changes
        .iter()
        .filter(|c| c.outcome == LayerOutcome::Added)
        .count()
}

#[cfg(test)]
mod tests;
