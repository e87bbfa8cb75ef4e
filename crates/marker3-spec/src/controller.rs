//! Animator controller data model: parameters, layers, states and transitions.
//!
//! These types describe an FX animator controller as plain data. The host
//! that owns the real asset reads a controller into this shape, lets the
//! builders append to it, and persists the result.

use serde::{Deserialize, Serialize};

// =============================================================================
// Parameters
// =============================================================================

/// Value type of an animator parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Float,
    Int,
    Bool,
    Trigger,
}

impl ParameterKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Float => "float",
            ParameterKind::Int => "int",
            ParameterKind::Bool => "bool",
            ParameterKind::Trigger => "trigger",
        }
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named animator parameter. Names are unique within a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
}

impl Parameter {
    /// Creates an int parameter.
    pub fn int(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Int,
        }
    }
}

// =============================================================================
// States and transitions
// =============================================================================

/// Opaque reference to an animation clip persisted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipHandle(pub String);

impl ClipHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClipHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A state in a layer's state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    pub name: String,
    /// Clip played while the state is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<ClipHandle>,
}

/// Comparison applied by a transition condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionMode {
    Equals,
    NotEqual,
    Greater,
    Less,
}

/// A guard on an integer parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub mode: ConditionMode,
    pub parameter: String,
    pub threshold: i32,
}

impl Condition {
    /// `parameter == value`.
    pub fn equals(parameter: impl Into<String>, value: i32) -> Self {
        Self {
            mode: ConditionMode::Equals,
            parameter: parameter.into(),
            threshold: value,
        }
    }

    /// Evaluates the condition against a parameter value.
    pub fn holds(&self, value: i32) -> bool {
        match self.mode {
            ConditionMode::Equals => value == self.threshold,
            ConditionMode::NotEqual => value != self.threshold,
            ConditionMode::Greater => value > self.threshold,
            ConditionMode::Less => value < self.threshold,
        }
    }
}

/// Where a transition may fire from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionSource {
    /// Evaluated from every state in the layer.
    AnyState,
    /// Evaluated only while the named state is active.
    State(String),
}

/// Which transitions may interrupt a running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptionSource {
    #[default]
    None,
    Source,
    Destination,
}

/// A guarded edge between states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    pub source: TransitionSource,
    pub destination: String,
    pub conditions: Vec<Condition>,
    pub has_exit_time: bool,
    pub has_fixed_duration: bool,
    /// Blend duration, normalized to the source state length.
    pub duration: f64,
    pub interruption_source: InterruptionSource,
    pub can_transition_to_self: bool,
}

impl Transition {
    /// An immediate, condition-driven transition: no exit time, normalized
    /// duration, interruptible by the destination, never a self-transition.
    pub fn immediate(
        source: TransitionSource,
        destination: impl Into<String>,
        condition: Condition,
        duration: f64,
    ) -> Self {
        Self {
            source,
            destination: destination.into(),
            conditions: vec![condition],
            has_exit_time: false,
            has_fixed_duration: false,
            duration,
            interruption_source: InterruptionSource::Destination,
            can_transition_to_self: false,
        }
    }

    /// True when every condition holds for `parameter == value`.
    ///
    /// Conditions on other parameters never hold.
    pub fn fires(&self, parameter: &str, value: i32) -> bool {
        !self.conditions.is_empty()
            && self
                .conditions
                .iter()
                .all(|c| c.parameter == parameter && c.holds(value))
    }
}

// =============================================================================
// State machines and layers
// =============================================================================

/// States and transitions of a single layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateMachine {
    pub name: String,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
    /// Entry state; the first state added unless set explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_state: Option<String>,
}

impl StateMachine {
    /// Creates an empty state machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a state with no motion.
    pub fn add_state(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.default_state.is_none() {
            self.default_state = Some(name.clone());
        }
        self.states.push(State { name, motion: None });
    }

    /// Looks up a state by name.
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    /// Looks up a state by name for modification.
    pub fn state_mut(&mut self, name: &str) -> Option<&mut State> {
        self.states.iter_mut().find(|s| s.name == name)
    }

    /// Adds a transition and returns it for further adjustment.
    pub fn add_transition(&mut self, transition: Transition) -> &mut Transition {
        self.transitions.push(transition);
        let index = self.transitions.len() - 1;
        &mut self.transitions[index]
    }

    /// Any-state transitions, in insertion order.
    pub fn any_state_transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions
            .iter()
            .filter(|t| t.source == TransitionSource::AnyState)
    }

    /// Transitions leaving the named state, in insertion order.
    pub fn transitions_from<'s, 'n>(
        &'s self,
        state: &'n str,
    ) -> impl Iterator<Item = &'s Transition> + 'n
    where
        's: 'n,
    {
        self.transitions
            .iter()
            .filter(move |t| matches!(&t.source, TransitionSource::State(s) if s == state))
    }

    /// Returns the state entered when `parameter` takes `value` while
    /// `current` is active, or `None` if no transition fires.
    ///
    /// Any-state transitions are evaluated first, then the current state's
    /// own transitions; the first one that fires wins. A transition that
    /// cannot target its own state is skipped when it would.
    pub fn next_state(&self, current: &str, parameter: &str, value: i32) -> Option<&str> {
        self.any_state_transitions()
            .chain(self.transitions_from(current))
            .filter(|t| t.can_transition_to_self || t.destination != current)
            .find(|t| t.fires(parameter, value))
            .map(|t| t.destination.as_str())
    }
}

/// How a layer combines with the layers below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendingMode {
    #[default]
    Override,
    Additive,
}

/// An animator layer: a state machine evaluated in parallel with its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    pub name: String,
    pub default_weight: f64,
    #[serde(default)]
    pub blending: BlendingMode,
    pub state_machine: StateMachine,
}

impl Layer {
    /// Creates a full-weight override layer with an empty state machine of
    /// the same name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            state_machine: StateMachine::new(name.clone()),
            name,
            default_weight: 1.0,
            blending: BlendingMode::Override,
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

/// An animator controller: ordered parameters and ordered layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimatorController {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl AnimatorController {
    /// Creates an empty controller.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parses a controller from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the controller to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Looks up a parameter by exact name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Looks up a layer by exact name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Index of the layer with the given name.
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }
}
