use super::*;
use crate::builder::{STATE_ACTIVATE, STATE_IDLE, STATE_RESET};
use crate::clip::ClipRole;
use crate::controller::Layer;
use crate::expression::{Control, ExpressionParameter, MENU_CAPACITY};
use crate::gesture::{Gesture, Hand};
use pretty_assertions::assert_eq;

fn fresh_avatar() -> Avatar {
    Avatar {
        fx_controller: AnimatorController::new("FX"),
        ..Default::default()
    }
}

fn fill_root(avatar: &mut Avatar, count: usize) {
    let root = avatar.expression_menus.root;
    for i in 0..count {
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
            .unwrap();
    }
}

// ============================================================================
// Prepare
// ============================================================================

#[test]
fn prepare_does_not_touch_the_avatar() {
    let avatar = fresh_avatar();
    let before = avatar.clone();
    let plan = InstallPlan::prepare(&MarkerConfig::default(), &avatar).unwrap();

    assert_eq!(avatar, before);
    assert_eq!(plan.preview().layers.len(), 2);
    assert_eq!(plan.new_parameters().len(), 2);
    assert_eq!(plan.expression_slot(), 0);
    assert!(plan.adds_menu_control());
    assert_eq!(plan.clips().len(), ClipRole::all().len());
    assert!(plan.warnings().is_empty());
}

#[test]
fn prepare_rejects_invalid_configuration() {
    let config = MarkerConfig::builder()
        .activate(Gesture::Victory)
        .reset(Gesture::Victory)
        .build();
    let err = InstallPlan::prepare(&config, &fresh_avatar()).unwrap_err();
    assert_eq!(err.code(), "MARKER_001");
    assert!(!err.validation_errors().is_empty());
}

#[test]
fn prepare_reports_unknown_menu_path() {
    let config = MarkerConfig::builder().submenu("Props").build();
    let err = InstallPlan::prepare(&config, &fresh_avatar()).unwrap_err();
    match err {
        MarkerError::UnknownMenu(label) => assert_eq!(label, "/Props"),
        other => panic!("expected unknown menu, got {other:?}"),
    }
}

#[test]
fn prepare_warns_on_parameter_kind_mismatch() {
    let mut avatar = fresh_avatar();
    avatar.fx_controller.parameters.push(Parameter {
        name: "ToggleMarker".into(),
        kind: ParameterKind::Bool,
    });
    let plan = InstallPlan::prepare(&MarkerConfig::default(), &avatar).unwrap();
    assert!(plan
        .warnings()
        .iter()
        .any(|w| w.code == WarningCode::ParameterTypeMismatch));
    assert_eq!(plan.new_parameters(), &[Parameter::int("GestureRight")]);
}

// ============================================================================
// Commit
// ============================================================================

#[test]
fn install_adds_layers_parameters_slot_and_control() {
    let mut avatar = fresh_avatar();
    let config = MarkerConfig::builder().hand(Hand::Left).build();
    let report = install(&config, &mut avatar).unwrap();

    let fx = &avatar.fx_controller;
    let names: Vec<&str> = fx.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["GestureLeft", "ToggleMarker"]);
    assert_eq!(
        fx.layers.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
        vec!["GestureLeftMarker", "ToggleMarker"]
    );

    let gesture = &fx.layers[0].state_machine;
    assert_eq!(
        gesture.next_state(STATE_IDLE, "GestureLeft", Gesture::FingerPoint.value()),
        Some(STATE_ACTIVATE)
    );
    assert_eq!(
        gesture.next_state(STATE_ACTIVATE, "GestureLeft", Gesture::HandOpen.value()),
        Some(STATE_RESET)
    );

    assert_eq!(avatar.expression_parameters.slots[0].name, "ToggleMarker");
    let root = avatar.expression_menus.menu(avatar.expression_menus.root).unwrap();
    assert_eq!(
        root.controls,
        vec![Control::Toggle {
            name: "Toggle Marker".into(),
            parameter: "ToggleMarker".into(),
            value: MARKER_CONTROL_VALUE,
        }]
    );

    assert_eq!(report.parameters_added, vec!["GestureLeft", "ToggleMarker"]);
    assert!(report.menu_control_added);
    assert_eq!(report.expression_slot, 0);
    assert_eq!(
        report.controller_hash,
        canonical_controller_hash(&avatar.fx_controller).unwrap()
    );
}

#[test]
fn committed_controller_matches_preview() {
    let mut avatar = fresh_avatar();
    let plan = InstallPlan::prepare(&MarkerConfig::default(), &avatar).unwrap();
    let preview = plan.preview().clone();
    let preview_hash = plan.controller_hash().to_string();

    let report = plan.commit(&mut avatar).unwrap();
    assert_eq!(avatar.fx_controller, preview);
    assert_eq!(report.controller_hash, preview_hash);
}

#[test]
fn second_install_changes_nothing() {
    let mut avatar = fresh_avatar();
    install(&MarkerConfig::default(), &mut avatar).unwrap();
    let after_first = avatar.clone();

    let report = install(&MarkerConfig::default(), &mut avatar).unwrap();
    assert_eq!(avatar, after_first);
    assert!(report.parameters_added.is_empty());
    assert!(!report.menu_control_added);
    assert!(report
        .layers
        .iter()
        .all(|c| c.outcome == LayerOutcome::AlreadyPresent));
    assert_eq!(
        report
            .warnings
            .iter()
            .filter(|w| w.code == WarningCode::LayerAlreadyPresent)
            .count(),
        2
    );
}

#[test]
fn existing_parameters_and_layers_are_kept_in_place() {
    let mut avatar = fresh_avatar();
    avatar.fx_controller.parameters.push(Parameter::int("VRCEmote"));
    avatar.fx_controller.layers.push(Layer::new("Base"));
    install(&MarkerConfig::default(), &mut avatar).unwrap();

    let fx = &avatar.fx_controller;
    assert_eq!(fx.parameters[0].name, "VRCEmote");
    assert_eq!(fx.layers[0].name, "Base");
    assert_eq!(fx.layers.len(), 3);
}

#[test]
fn full_menu_fails_without_changes() {
    let mut avatar = fresh_avatar();
    fill_root(&mut avatar, MENU_CAPACITY);
    let before = avatar.clone();

    let err = install(&MarkerConfig::default(), &mut avatar).unwrap_err();
    assert!(matches!(
        err,
        MarkerError::CapacityExceeded {
            capacity: MENU_CAPACITY,
            ..
        }
    ));
    assert_eq!(avatar, before);
}

#[test]
fn exhausted_parameters_fail_without_changes() {
    let mut avatar = fresh_avatar();
    avatar.expression_parameters = ExpressionParameters {
        slots: vec![
            ExpressionParameter {
                name: "VRCEmote".into(),
                kind: ExpressionValueKind::Int,
            },
            ExpressionParameter {
                name: "Hat".into(),
                kind: ExpressionValueKind::Bool,
            },
        ],
    };
    let before = avatar.clone();

    let err = install(&MarkerConfig::default(), &mut avatar).unwrap_err();
    assert_eq!(err.code(), "MARKER_003");
    assert_eq!(avatar, before);
}

#[test]
fn commit_rechecks_room() {
    let mut avatar = fresh_avatar();
    fill_root(&mut avatar, MENU_CAPACITY - 1);
    let plan = InstallPlan::prepare(&MarkerConfig::default(), &avatar).unwrap();

    fill_root(&mut avatar, 1);
    let before = avatar.clone();
    assert!(plan.commit(&mut avatar).is_err());
    assert_eq!(avatar, before);
}

#[test]
fn commit_follows_the_avatar_it_is_applied_to() {
    let mut prepared_on = fresh_avatar();
    prepared_on
        .fx_controller
        .parameters
        .push(Parameter::int("GestureRight"));
    let plan = InstallPlan::prepare(&MarkerConfig::default(), &prepared_on).unwrap();
    assert_eq!(plan.new_parameters(), &[Parameter::int("ToggleMarker")]);

    let mut target = fresh_avatar();
    target.fx_controller.layers.push(Layer::new("ToggleMarker"));
    let report = plan.commit(&mut target).unwrap();

    let fx = &target.fx_controller;
    assert!(fx.parameter("GestureRight").is_some());
    assert!(fx.parameter("ToggleMarker").is_some());
    assert_eq!(report.parameters_added, vec!["GestureRight", "ToggleMarker"]);
    assert_eq!(
        report.layers,
        vec![
            LayerChange {
                name: "GestureRightMarker".into(),
                outcome: LayerOutcome::Added,
            },
            LayerChange {
                name: "ToggleMarker".into(),
                outcome: LayerOutcome::AlreadyPresent,
            },
        ]
    );
    assert_eq!(
        report
            .warnings
            .iter()
            .filter(|w| w.code == WarningCode::LayerAlreadyPresent)
            .count(),
        1
    );

    for layer in &fx.layers {
        for transition in &layer.state_machine.transitions {
            for condition in &transition.conditions {
                assert!(fx.parameter(&condition.parameter).is_some());
            }
        }
    }
}

#[test]
fn installs_into_nested_menu() {
    let mut avatar = fresh_avatar();
    let props = avatar.expression_menus.add_menu("Props");
    let root = avatar.expression_menus.root;
    avatar
        .expression_menus
        .add_submenu(root, "Props", props)
        .unwrap();

    let config = MarkerConfig::builder()
        .submenu("Props")
        .control_name("Pen")
        .build();
    let report = install(&config, &mut avatar).unwrap();

    assert_eq!(report.menu_path, vec!["Props".to_string()]);
    let menu = avatar.expression_menus.menu(props).unwrap();
    assert_eq!(menu.controls.len(), 1);
    assert_eq!(menu.controls[0].name(), "Pen");
    assert_eq!(menu_label(&report.menu_path), "/Props");
}

#[test]
fn avatar_json_defaults_expression_assets() {
    let avatar = Avatar::from_json(r#"{"fx_controller": {"name": "FX"}}"#).unwrap();
    assert_eq!(avatar.expression_parameters, ExpressionParameters::default());
    assert_eq!(avatar.expression_menus, ExpressionMenus::default());

    let back = Avatar::from_json(&avatar.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, avatar);
}
