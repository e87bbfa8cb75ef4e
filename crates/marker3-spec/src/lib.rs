//! Marker3 Animator Library
//!
//! This crate builds the animator layers that drive a hand-held trail
//! marker on an avatar. A gesture layer watches one hand's gesture
//! parameter and routes it to drawing or erasing; a toggle layer switches
//! the marker on and off from an expression menu.
//!
//! # Overview
//!
//! - **Controllers**: a portable model of animator controllers (parameters,
//!   layers, state machines, guarded transitions)
//! - **Builders**: pure functions that produce the gesture and toggle layers
//!   and insert them idempotently
//! - **Install**: a two-phase plan that also claims an expression parameter
//!   slot and adds a menu toggle, failing before any write
//!
//! # Example
//!
//! ```
//! use marker3_spec::{install, Avatar, AnimatorController, Gesture, MarkerConfig};
//! use marker3_spec::validation::validate_config;
//!
//! let config = MarkerConfig::builder()
//!     .activate(Gesture::FingerPoint)
//!     .reset(Gesture::HandOpen)
//!     .build();
//! assert!(validate_config(&config).is_ok());
//!
//! let mut avatar = Avatar {
//!     fx_controller: AnimatorController::new("FX"),
//!     ..Default::default()
//! };
//! let report = install(&config, &mut avatar).unwrap();
//! assert_eq!(avatar.fx_controller.layers.len(), 2);
//! println!("controller hash: {}", report.controller_hash);
//! ```
//!
//! # Modules
//!
//! - [`controller`]: Animator controller model and state machine evaluation
//! - [`builder`]: Gesture and toggle layer builders
//! - [`clip`]: Clip roles and marker clip synthesis
//! - [`config`]: Marker configuration and builder
//! - [`expression`]: Expression parameters and menus
//! - [`install`]: Prepare/commit installation into an avatar
//! - [`validation`]: Configuration validation
//! - [`hash`]: Canonical controller hashing

pub mod builder;
pub mod clip;
pub mod config;
pub mod controller;
pub mod error;
pub mod expression;
pub mod gesture;
pub mod hash;
pub mod install;
pub mod validation;

// Re-export commonly used types at the crate root
pub use builder::{
    ensure_gesture_layer, ensure_toggle_layer, gesture_layer, register_parameter, toggle_layer,
    EnsuredLayer, GestureLayerRequest, LayerOutcome, ToggleLayerRequest,
};
pub use clip::{synthesize_clips, AnimationClip, ClipLibrary, ClipRole, ClipSet};
pub use config::{MarkerConfig, MarkerConfigBuilder};
pub use controller::{
    AnimatorController, BlendingMode, ClipHandle, Condition, ConditionMode, InterruptionSource,
    Layer, Parameter, ParameterKind, State, StateMachine, Transition, TransitionSource,
};
pub use error::{
    ErrorCode, MarkerError, MarkerResult, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use expression::{
    Control, ExpressionMenu, ExpressionMenus, ExpressionParameter, ExpressionParameters,
    ExpressionValueKind, MenuId, MenuLocation, MENU_CAPACITY,
};
pub use gesture::{Gesture, Hand, GESTURE_COUNT};
pub use hash::canonical_controller_hash;
pub use install::{install, Avatar, InstallPlan, InstallReport, LayerChange};
pub use validation::validate_config;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn full_install_workflow() {
        let config = MarkerConfig::builder()
            .hand(Hand::Left)
            .activate(Gesture::Victory)
            .reset(Gesture::Fist)
            .toggle("PenToggle")
            .animation_path("Armature/Hips/Chest/Pen")
            .build();

        let result = validate_config(&config);
        assert!(result.is_ok(), "{:?}", result.errors);

        let mut avatar = Avatar {
            fx_controller: AnimatorController::new("FX"),
            ..Default::default()
        };
        let report = install(&config, &mut avatar).unwrap();

        let fx = &avatar.fx_controller;
        assert!(fx.layer("GestureLeftMarker").is_some());
        assert!(fx.layer("PenToggle").is_some());
        assert_eq!(report.parameters_added, vec!["GestureLeft", "PenToggle"]);

        let draw = report.clips.get(ClipRole::ActivateDraw).unwrap();
        assert_eq!(draw.curves[0].path, "Armature/Hips/Chest/Pen");
    }

    #[test]
    fn controller_round_trips_through_json() {
        let mut avatar = Avatar {
            fx_controller: AnimatorController::new("FX"),
            ..Default::default()
        };
        install(&MarkerConfig::default(), &mut avatar).unwrap();

        let json = avatar.fx_controller.to_json_pretty().unwrap();
        let parsed = AnimatorController::from_json(&json).unwrap();
        assert_eq!(parsed, avatar.fx_controller);
        assert_eq!(
            canonical_controller_hash(&parsed).unwrap(),
            canonical_controller_hash(&avatar.fx_controller).unwrap()
        );
    }
}
