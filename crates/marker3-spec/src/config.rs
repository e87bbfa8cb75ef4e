//! Marker installation configuration.

use serde::{Deserialize, Serialize};

use crate::builder::{GestureLayerRequest, ToggleLayerRequest};
use crate::gesture::{Gesture, Hand, GESTURE_COUNT};

/// Default name of the toggle parameter and toggle layer.
pub const DEFAULT_TOGGLE_NAME: &str = "ToggleMarker";

/// Default name of the menu control that drives the toggle parameter.
pub const DEFAULT_CONTROL_NAME: &str = "Toggle Marker";

/// Suffix appended to the watched gesture parameter to name the gesture layer.
pub const GESTURE_LAYER_SUFFIX: &str = "Marker";

/// Everything needed to install a marker on an avatar.
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Hand whose gesture parameter is watched.
    pub hand: Hand,
    /// Gesture that starts drawing.
    pub activate_gesture: Gesture,
    /// Gesture that erases the trail.
    pub reset_gesture: Gesture,
    /// Int parameter driven by the menu toggle.
    pub toggle_parameter: String,
    /// Name of the toggle layer.
    pub toggle_layer: String,
    /// Path from the avatar root to the marker's trail renderer.
    pub animation_path: String,
    /// Submenu titles leading from the root menu to the target menu.
    pub menu: Vec<String>,
    /// Name of the toggle control added to the target menu.
    pub control_name: String,
    /// Size of the trigger enumeration the gesture layer covers.
    pub trigger_count: i32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            hand: Hand::Right,
            activate_gesture: Gesture::FingerPoint,
            reset_gesture: Gesture::HandOpen,
            toggle_parameter: DEFAULT_TOGGLE_NAME.to_string(),
            toggle_layer: DEFAULT_TOGGLE_NAME.to_string(),
            animation_path: "Marker".to_string(),
            menu: Vec::new(),
            control_name: DEFAULT_CONTROL_NAME.to_string(),
            trigger_count: GESTURE_COUNT,
        }
    }
}

impl MarkerConfig {
    /// Creates a new config builder starting from the defaults.
    pub fn builder() -> MarkerConfigBuilder {
        MarkerConfigBuilder::new()
    }

    /// Parses a config from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Gesture parameter watched by the gesture layer.
    pub fn watched_parameter(&self) -> &'static str {
        self.hand.gesture_parameter()
    }

    /// Name of the gesture layer, e.g. `GestureRightMarker`.
    pub fn gesture_layer_name(&self) -> String {
        format!("{}{}", self.watched_parameter(), GESTURE_LAYER_SUFFIX)
    }

    /// Request for the gesture layer builder.
    pub fn gesture_request(&self) -> GestureLayerRequest {
        GestureLayerRequest {
            layer_name: self.gesture_layer_name(),
            watched_parameter: self.watched_parameter().to_string(),
            activate: self.activate_gesture.value(),
            reset: self.reset_gesture.value(),
            trigger_count: self.trigger_count,
        }
    }

    /// Request for the toggle layer builder.
    pub fn toggle_request(&self) -> ToggleLayerRequest {
        ToggleLayerRequest {
            layer_name: self.toggle_layer.clone(),
            parameter: self.toggle_parameter.clone(),
        }
    }
}

/// Builder for [`MarkerConfig`].
#[derive(Debug, Clone, Default)]
pub struct MarkerConfigBuilder {
    config: MarkerConfig,
}

impl MarkerConfigBuilder {
    /// Creates a builder holding the default config.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand(mut self, hand: Hand) -> Self {
        self.config.hand = hand;
        self
    }

    pub fn activate(mut self, gesture: Gesture) -> Self {
        self.config.activate_gesture = gesture;
        self
    }

    pub fn reset(mut self, gesture: Gesture) -> Self {
        self.config.reset_gesture = gesture;
        self
    }

    /// Sets the toggle parameter and toggle layer name together.
    pub fn toggle(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.config.toggle_layer = name.clone();
        self.config.toggle_parameter = name;
        self
    }

    pub fn animation_path(mut self, path: impl Into<String>) -> Self {
        self.config.animation_path = path.into();
        self
    }

    /// Appends a submenu title to the target menu path.
    pub fn submenu(mut self, title: impl Into<String>) -> Self {
        self.config.menu.push(title.into());
        self
    }

    pub fn control_name(mut self, name: impl Into<String>) -> Self {
        self.config.control_name = name.into();
        self
    }

    pub fn trigger_count(mut self, count: i32) -> Self {
        self.config.trigger_count = count;
        self
    }

    /// Builds the config.
    pub fn build(self) -> MarkerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default_config() {
        let config = MarkerConfig::from_json("{}").unwrap();
        assert_eq!(config, MarkerConfig::default());
        assert_eq!(config.activate_gesture, Gesture::FingerPoint);
        assert_eq!(config.reset_gesture, Gesture::HandOpen);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(MarkerConfig::from_json(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn parses_partial_config() {
        let config = MarkerConfig::from_json(
            r#"{ "hand": "left", "activate_gesture": "victory", "menu": ["Props"] }"#,
        )
        .unwrap();
        assert_eq!(config.hand, Hand::Left);
        assert_eq!(config.activate_gesture, Gesture::Victory);
        assert_eq!(config.reset_gesture, Gesture::HandOpen);
        assert_eq!(config.menu, vec!["Props".to_string()]);
    }

    #[test]
    fn derived_names_follow_hand() {
        let config = MarkerConfig::builder().hand(Hand::Left).build();
        assert_eq!(config.watched_parameter(), "GestureLeft");
        assert_eq!(config.gesture_layer_name(), "GestureLeftMarker");
    }

    #[test]
    fn requests_carry_gesture_values() {
        let config = MarkerConfig::builder()
            .activate(Gesture::FingerPoint)
            .reset(Gesture::Fist)
            .toggle("Pen")
            .build();

        let gesture = config.gesture_request();
        assert_eq!(gesture.activate, 3);
        assert_eq!(gesture.reset, 1);
        assert_eq!(gesture.trigger_count, GESTURE_COUNT);
        assert_eq!(gesture.watched_parameter, "GestureRight");

        let toggle = config.toggle_request();
        assert_eq!(toggle.layer_name, "Pen");
        assert_eq!(toggle.parameter, "Pen");
    }

    #[test]
    fn json_round_trip() {
        let config = MarkerConfig::builder()
            .submenu("Props")
            .submenu("Art")
            .animation_path("Armature/Hips/Marker")
            .build();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(MarkerConfig::from_json(&json).unwrap(), config);
    }
}
