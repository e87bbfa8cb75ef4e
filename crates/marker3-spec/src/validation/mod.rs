//! Configuration validation.
//!
//! Everything here runs before any state machine is constructed; a request
//! that fails validation never reaches a controller.


use crate::builder::{GestureLayerRequest, ToggleLayerRequest};
use crate::config::MarkerConfig;
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::gesture::GESTURE_COUNT;

/// Largest trigger enumeration a gesture layer may cover.
pub const MAX_TRIGGER_COUNT: i32 = GESTURE_COUNT;

/// Returns true if `name` is usable as a parameter, layer, control or
/// submenu name:
/// non-empty and without leading or trailing whitespace.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.trim() == name
}

/// Returns true if `path` is a relative object path with no empty segments.
/// The empty path (the avatar root itself) is accepted.
pub fn is_valid_animation_path(path: &str) -> bool {
    path.is_empty() || path.split('/').all(|segment| !segment.trim().is_empty())
}

/// Validates a gesture layer request.
pub fn validate_gesture_request(request: &GestureLayerRequest) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_name(
        &request.layer_name,
        ErrorCode::InvalidLayerName,
        "layer_name",
        &mut result,
    );
    check_name(
        &request.watched_parameter,
        ErrorCode::InvalidParameterName,
        "watched_parameter",
        &mut result,
    );
    check_triggers(
        request.activate,
        request.reset,
        request.trigger_count,
        ("activate", "reset", "trigger_count"),
        &mut result,
    );
    result
}

/// Validates a toggle layer request.
pub fn validate_toggle_request(request: &ToggleLayerRequest) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_name(
        &request.layer_name,
        ErrorCode::InvalidLayerName,
        "layer_name",
        &mut result,
    );
    check_name(
        &request.parameter,
        ErrorCode::InvalidParameterName,
        "parameter",
        &mut result,
    );
    result
}

/// Validates a full marker configuration.
///
/// # Example
/// ```
/// use marker3_spec::{Gesture, MarkerConfig};
/// use marker3_spec::validation::validate_config;
///
/// let config = MarkerConfig::builder()
///     .activate(Gesture::Victory)
///     .reset(Gesture::Victory)
///     .build();
///
/// let result = validate_config(&config);
/// assert!(!result.is_ok());
/// ```
pub fn validate_config(config: &MarkerConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    check_triggers(
        config.activate_gesture.value(),
        config.reset_gesture.value(),
        config.trigger_count,
        ("activate_gesture", "reset_gesture", "trigger_count"),
        &mut result,
    );
    check_name(
        &config.toggle_parameter,
        ErrorCode::InvalidParameterName,
        "toggle_parameter",
        &mut result,
    );
    check_name(
        &config.toggle_layer,
        ErrorCode::InvalidLayerName,
        "toggle_layer",
        &mut result,
    );
    check_name(
        &config.control_name,
        ErrorCode::InvalidControlName,
        "control_name",
        &mut result,
    );

    if config.toggle_layer == config.gesture_layer_name() {
        result.add_error(ValidationError::with_path(
            ErrorCode::DuplicateLayerName,
            format!(
                "toggle layer '{}' collides with the gesture layer",
                config.toggle_layer
            ),
            "toggle_layer",
        ));
    }
    if config.toggle_parameter == config.watched_parameter() {
        result.add_error(ValidationError::with_path(
            ErrorCode::DuplicateParameterName,
            format!(
                "toggle parameter '{}' collides with the watched gesture parameter",
                config.toggle_parameter
            ),
            "toggle_parameter",
        ));
    }

    if !is_valid_animation_path(&config.animation_path) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidAnimationPath,
            format!(
                "animation_path must be relative with non-empty segments, got '{}'",
                config.animation_path
            ),
            "animation_path",
        ));
    } else if config.animation_path.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyAnimationPath,
            "clips will animate a trail renderer on the avatar root",
            "animation_path",
        ));
    }

    for (i, title) in config.menu.iter().enumerate() {
        if !is_valid_name(title) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidMenuPath,
                format!(
                    "submenu title must be non-empty without surrounding whitespace, got '{}'",
                    title
                ),
                format!("menu[{}]", i),
            ));
        }
    }

    result
}

fn check_name(name: &str, code: ErrorCode, path: &str, result: &mut ValidationResult) {
    if !is_valid_name(name) {
        result.add_error(ValidationError::with_path(
            code,
            format!(
                "{} must be non-empty without surrounding whitespace, got '{}'",
                path, name
            ),
            path,
        ));
    }
}

fn check_triggers(
    activate: i32,
    reset: i32,
    trigger_count: i32,
    paths: (&str, &str, &str),
    result: &mut ValidationResult,
) {
    let (activate_path, reset_path, count_path) = paths;

    if !(1..=MAX_TRIGGER_COUNT).contains(&trigger_count) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTriggerCount,
            format!(
                "trigger_count must be between 1 and {}, got {}",
                MAX_TRIGGER_COUNT, trigger_count
            ),
            count_path,
        ));
    }

    for (value, path) in [(activate, activate_path), (reset, reset_path)] {
        if !(0..trigger_count).contains(&value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::TriggerOutOfRange,
                format!(
                    "trigger value {} is outside 0..{}",
                    value, trigger_count
                ),
                path,
            ));
        }
    }

    if activate == reset {
        result.add_error(ValidationError::with_path(
            ErrorCode::TriggerCollision,
            format!(
                "activate and reset both use trigger value {}; each trigger value routes to one state",
                activate
            ),
            reset_path,
        ));
    }
}
