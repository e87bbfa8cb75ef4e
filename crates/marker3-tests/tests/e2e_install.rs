//! End-to-end install tests: config and avatar documents on disk through
//! the CLI commands.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p marker3-tests --test e2e_install
//! ```

use pretty_assertions::assert_eq;
use std::process::ExitCode;

use marker3_cli::commands;
use marker3_spec::{
    install, Control, ExpressionParameter, ExpressionParameters, ExpressionValueKind, Gesture,
    Hand, InstallPlan, MarkerConfig, MarkerError,
};
use marker3_tests::{
    avatar_with_props_menu, empty_avatar, file_hash, full_menu_avatar, ProjectFixture,
};

// ============================================================================
// Successful installs
// ============================================================================

#[test]
fn install_into_empty_avatar() {
    let fixture = ProjectFixture::new(&MarkerConfig::default(), &empty_avatar());

    let code = commands::install::run(fixture.config(), fixture.avatar(), None, None, false)
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let avatar = fixture.read_avatar();
    let fx = &avatar.fx_controller;
    assert!(fx.parameter("GestureRight").is_some());
    assert!(fx.parameter("ToggleMarker").is_some());
    assert!(fx.layer("GestureRightMarker").is_some());
    assert!(fx.layer("ToggleMarker").is_some());
    assert_eq!(avatar.expression_parameters.find("ToggleMarker"), Some(0));

    let root = avatar
        .expression_menus
        .menu(avatar.expression_menus.root)
        .unwrap();
    assert!(root.has_toggle_for("ToggleMarker"));
}

#[test]
fn install_into_submenu_of_cyclic_menus() {
    let (avatar, props) = avatar_with_props_menu();
    let config = MarkerConfig::builder()
        .hand(Hand::Left)
        .activate(Gesture::Victory)
        .reset(Gesture::Fist)
        .submenu("Props")
        .build();
    let fixture = ProjectFixture::new(&config, &avatar);

    let code = commands::install::run(fixture.config(), fixture.avatar(), None, None, true)
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let written = fixture.read_avatar();
    let menu = written.expression_menus.menu(props).unwrap();
    assert_eq!(
        menu.controls.last(),
        Some(&Control::Toggle {
            name: "Toggle Marker".into(),
            parameter: "ToggleMarker".into(),
            value: 1,
        })
    );
    assert!(written.fx_controller.layer("GestureLeftMarker").is_some());
}

#[test]
fn existing_marker_setup_is_left_alone() {
    let mut avatar = empty_avatar();
    install(&MarkerConfig::default(), &mut avatar).unwrap();
    let fixture = ProjectFixture::new(&MarkerConfig::default(), &avatar);
    let before = fixture.read_avatar();

    let code = commands::install::run(fixture.config(), fixture.avatar(), None, None, false)
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(fixture.read_avatar(), before);
}

// ============================================================================
// Rejected installs
// ============================================================================

#[test]
fn full_menu_leaves_file_untouched() {
    let fixture = ProjectFixture::new(&MarkerConfig::default(), &full_menu_avatar());
    let hash = file_hash(&fixture.avatar_path);

    let code = commands::install::run(fixture.config(), fixture.avatar(), None, None, true)
        .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(file_hash(&fixture.avatar_path), hash);
}

#[test]
fn exhausted_expression_parameters_leave_avatar_untouched() {
    let mut avatar = empty_avatar();
    avatar.expression_parameters = ExpressionParameters {
        slots: (0..4)
            .map(|i| ExpressionParameter {
                name: format!("Used{}", i),
                kind: ExpressionValueKind::Int,
            })
            .collect(),
    };
    let before = avatar.clone();

    let err = install(&MarkerConfig::default(), &mut avatar).unwrap_err();
    assert!(matches!(err, MarkerError::ParametersExhausted { slots: 4, .. }));
    assert_eq!(avatar, before);
}

#[test]
fn invalid_config_fails_prepare() {
    let config = MarkerConfig::builder()
        .activate(Gesture::ThumbsUp)
        .reset(Gesture::ThumbsUp)
        .build();
    let avatar = empty_avatar();
    let err = InstallPlan::prepare(&config, &avatar).unwrap_err();
    assert_eq!(err.code(), "MARKER_001");

    let fixture = ProjectFixture::new(&config, &avatar);
    let hash = file_hash(&fixture.avatar_path);
    let code = commands::install::run(fixture.config(), fixture.avatar(), None, None, false)
        .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(file_hash(&fixture.avatar_path), hash);
}

#[test]
fn validate_and_plan_commands_agree_with_install() {
    let fixture = ProjectFixture::new(&MarkerConfig::default(), &full_menu_avatar());

    assert_eq!(
        commands::validate::run(fixture.config(), true).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(
        commands::plan::run(fixture.config(), fixture.avatar(), true).unwrap(),
        ExitCode::from(1)
    );
    assert_eq!(
        commands::menus::run(fixture.avatar(), true).unwrap(),
        ExitCode::SUCCESS
    );
}
