//! Gesture and toggle layer builders, and the parameter registrar.
//!
//! Builders are pure: they validate a request, then construct a [`Layer`]
//! value. The `ensure_*` functions add that layer to a controller unless a
//! layer with the same name is already present, in which case the
//! controller is left exactly as it was.


use log::debug;
use serde::{Deserialize, Serialize};

use crate::clip::{ClipRole, ClipSet};
use crate::controller::{
    AnimatorController, BlendingMode, Condition, Layer, Parameter, ParameterKind, Transition,
    TransitionSource,
};
use crate::error::{MarkerError, MarkerResult, ValidationResult};
use crate::validation::{validate_gesture_request, validate_toggle_request};

/// Gesture layer state entered on neutral and unassigned gestures.
pub const STATE_IDLE: &str = "Idle";
/// Gesture layer state that draws.
pub const STATE_ACTIVATE: &str = "Activate";
/// Gesture layer state that erases.
pub const STATE_RESET: &str = "Reset";
/// Toggle layer state with the marker hidden.
pub const STATE_OFF: &str = "Off";
/// Toggle layer state with the marker shown.
pub const STATE_ON: &str = "On";

/// Normalized blend duration of gesture transitions.
pub const GESTURE_TRANSITION_DURATION: f64 = 0.1;
/// Blend duration of toggle transitions.
pub const TOGGLE_TRANSITION_DURATION: f64 = 0.0;

/// Input to the gesture layer builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GestureLayerRequest {
    pub layer_name: String,
    /// Int parameter carrying the trigger value.
    pub watched_parameter: String,
    /// Trigger value routed to `Activate`.
    pub activate: i32,
    /// Trigger value routed to `Reset`.
    pub reset: i32,
    /// Number of trigger values; one transition is built per value.
    pub trigger_count: i32,
}

impl GestureLayerRequest {
    pub fn validate(&self) -> ValidationResult {
        validate_gesture_request(self)
    }

    /// State that trigger `value` routes to.
    pub fn target_for(&self, value: i32) -> &'static str {
        if value == self.activate {
            STATE_ACTIVATE
        } else if value == self.reset {
            STATE_RESET
        } else {
            STATE_IDLE
        }
    }
}

/// Input to the toggle layer builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleLayerRequest {
    pub layer_name: String,
    /// Int parameter switching between `Off` (0) and `On` (1).
    pub parameter: String,
}

impl ToggleLayerRequest {
    pub fn validate(&self) -> ValidationResult {
        validate_toggle_request(self)
    }
}

/// Whether an `ensure_*` call added a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerOutcome {
    Added,
    AlreadyPresent,
}

/// The layer found or added by an `ensure_*` call.
#[derive(Debug, Clone, Copy)]
pub struct EnsuredLayer<'c> {
    pub layer: &'c Layer,
    pub outcome: LayerOutcome,
}

/// Adds a parameter unless one with the same name exists.
///
/// Returns `true` if the parameter was added. An existing parameter is left
/// untouched even if its kind differs.
pub fn register_parameter(
    parameters: &mut Vec<Parameter>,
    name: &str,
    kind: ParameterKind,
) -> bool {
    if parameters.iter().any(|p| p.name == name) {
        debug!("parameter '{}' already present", name);
        return false;
    }
    debug!("adding {} parameter '{}'", kind, name);
    parameters.push(Parameter {
        name: name.to_string(),
        kind,
    });
    true
}

/// Builds the gesture layer.
///
/// The layer has the states `Idle`, `Activate` and `Reset` (entry `Idle`)
/// and one any-state transition per trigger value, guarded by
/// `watched_parameter == value`. `Activate` and `Reset` play the
/// `activate-draw` and `reset-erase` clips when supplied.
///
/// # Example
/// ```
/// use marker3_spec::builder::{gesture_layer, GestureLayerRequest};
/// use marker3_spec::ClipSet;
///
/// let request = GestureLayerRequest {
///     layer_name: "GestureRightMarker".into(),
///     watched_parameter: "GestureRight".into(),
///     activate: 3,
///     reset: 1,
///     trigger_count: 8,
/// };
/// let layer = gesture_layer(&request, &ClipSet::new()).unwrap();
/// assert_eq!(layer.state_machine.states.len(), 3);
/// assert_eq!(layer.state_machine.transitions.len(), 8);
/// ```
pub fn gesture_layer(request: &GestureLayerRequest, clips: &ClipSet) -> MarkerResult<Layer> {
    reject_invalid(request.validate())?;
    Ok(build_gesture_layer(request, clips))
}

fn build_gesture_layer(request: &GestureLayerRequest, clips: &ClipSet) -> Layer {
    let mut layer = Layer::new(&request.layer_name);
    let sm = &mut layer.state_machine;
    sm.add_state(STATE_IDLE);
    sm.add_state(STATE_ACTIVATE);
    sm.add_state(STATE_RESET);

    for value in 0..request.trigger_count {
        sm.add_transition(Transition::immediate(
            TransitionSource::AnyState,
            request.target_for(value),
            Condition::equals(&request.watched_parameter, value),
            GESTURE_TRANSITION_DURATION,
        ));
    }

    attach(&mut layer, STATE_ACTIVATE, clips, ClipRole::ActivateDraw);
    attach(&mut layer, STATE_RESET, clips, ClipRole::ResetErase);
    layer
}

/// Builds the toggle layer.
///
/// The layer has the states `Off` (entry) and `On`, with `Off -> On` when
/// the parameter equals 1 and `On -> Off` when it equals 0.
pub fn toggle_layer(request: &ToggleLayerRequest, clips: &ClipSet) -> MarkerResult<Layer> {
    reject_invalid(request.validate())?;
    Ok(build_toggle_layer(request, clips))
}

fn build_toggle_layer(request: &ToggleLayerRequest, clips: &ClipSet) -> Layer {
    let mut layer = Layer::new(&request.layer_name);
    layer.blending = BlendingMode::Override;
    let sm = &mut layer.state_machine;
    sm.add_state(STATE_OFF);
    sm.add_state(STATE_ON);
    sm.add_transition(Transition::immediate(
        TransitionSource::State(STATE_OFF.to_string()),
        STATE_ON,
        Condition::equals(&request.parameter, 1),
        TOGGLE_TRANSITION_DURATION,
    ));
    sm.add_transition(Transition::immediate(
        TransitionSource::State(STATE_ON.to_string()),
        STATE_OFF,
        Condition::equals(&request.parameter, 0),
        TOGGLE_TRANSITION_DURATION,
    ));

    attach(&mut layer, STATE_OFF, clips, ClipRole::ToggleOff);
    attach(&mut layer, STATE_ON, clips, ClipRole::ToggleOn);
    layer
}

/// Adds the gesture layer to `controller` unless a layer of that name exists.
///
/// The request is validated first, so an invalid request fails even when
/// the layer is already present. The watched parameter must already be
/// declared on the controller (see [`register_parameter`]).
pub fn ensure_gesture_layer<'c>(
    controller: &'c mut AnimatorController,
    request: &GestureLayerRequest,
    clips: &ClipSet,
) -> MarkerResult<EnsuredLayer<'c>> {
    reject_invalid(request.validate())?;
    ensure_layer(
        controller,
        &request.layer_name,
        &request.watched_parameter,
        || build_gesture_layer(request, clips),
    )
}

/// Adds the toggle layer to `controller` unless a layer of that name exists.
pub fn ensure_toggle_layer<'c>(
    controller: &'c mut AnimatorController,
    request: &ToggleLayerRequest,
    clips: &ClipSet,
) -> MarkerResult<EnsuredLayer<'c>> {
    reject_invalid(request.validate())?;
    ensure_layer(controller, &request.layer_name, &request.parameter, || {
        build_toggle_layer(request, clips)
    })
}

fn ensure_layer<'c>(
    controller: &'c mut AnimatorController,
    layer_name: &str,
    parameter: &str,
    build: impl FnOnce() -> Layer,
) -> MarkerResult<EnsuredLayer<'c>> {
    if let Some(index) = controller.layer_index(layer_name) {
        debug!("layer '{}' already present, leaving it untouched", layer_name);
        return Ok(EnsuredLayer {
            layer: &controller.layers[index],
            outcome: LayerOutcome::AlreadyPresent,
        });
    }

    if controller.parameter(parameter).is_none() {
        return Err(MarkerError::UnresolvedParameter {
            layer: layer_name.to_string(),
            parameter: parameter.to_string(),
        });
    }

    let layer = build();
    debug!(
        "adding layer '{}' ({} states, {} transitions)",
        layer.name,
        layer.state_machine.states.len(),
        layer.state_machine.transitions.len()
    );
    controller.layers.push(layer);
    let index = controller.layers.len() - 1;
    Ok(EnsuredLayer {
        layer: &controller.layers[index],
        outcome: LayerOutcome::Added,
    })
}

fn attach(layer: &mut Layer, state: &str, clips: &ClipSet, role: ClipRole) {
    if let Some(handle) = clips.get(role) {
        if let Some(state) = layer.state_machine.state_mut(state) {
            state.motion = Some(handle.clone());
        }
    }
}

fn reject_invalid(result: ValidationResult) -> MarkerResult<()> {
    result
        .into_result()
        .map(|_| ())
        .map_err(MarkerError::configuration)
}
