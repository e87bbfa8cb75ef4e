//! Determinism tests: identical inputs give identical controllers and
//! byte-identical avatar documents.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p marker3-tests --test e2e_determinism
//! ```

use std::process::ExitCode;

use marker3_cli::commands;
use marker3_spec::{canonical_controller_hash, install, Gesture, Hand, InstallPlan, MarkerConfig};
use marker3_tests::{avatar_with_props_menu, empty_avatar, file_hash, ProjectFixture};

fn left_victory() -> MarkerConfig {
    MarkerConfig::builder()
        .hand(Hand::Left)
        .activate(Gesture::Victory)
        .reset(Gesture::RockNRoll)
        .build()
}

#[test]
fn controller_hash_is_stable_across_runs() {
    let mut first = empty_avatar();
    let mut second = empty_avatar();
    let a = install(&left_victory(), &mut first).unwrap();
    let b = install(&left_victory(), &mut second).unwrap();

    assert_eq!(a.controller_hash, b.controller_hash);
    assert_eq!(first, second);
}

#[test]
fn different_configs_hash_differently() {
    let mut left = empty_avatar();
    let mut right = empty_avatar();
    let a = install(&left_victory(), &mut left).unwrap();
    let b = install(&MarkerConfig::default(), &mut right).unwrap();
    assert_ne!(a.controller_hash, b.controller_hash);
}

#[test]
fn plan_hash_predicts_installed_controller() {
    let (avatar, _) = avatar_with_props_menu();
    let config = MarkerConfig::builder().submenu("Props").build();
    let plan = InstallPlan::prepare(&config, &avatar).unwrap();
    let predicted = plan.controller_hash().to_string();

    let mut avatar = avatar;
    plan.commit(&mut avatar).unwrap();
    assert_eq!(
        canonical_controller_hash(&avatar.fx_controller).unwrap(),
        predicted
    );
}

#[test]
fn installed_documents_are_byte_identical() {
    let one = ProjectFixture::new(&left_victory(), &empty_avatar());
    let two = ProjectFixture::new(&left_victory(), &empty_avatar());

    for fixture in [&one, &two] {
        let code = commands::install::run(fixture.config(), fixture.avatar(), None, None, true)
            .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
    assert_eq!(file_hash(&one.avatar_path), file_hash(&two.avatar_path));
}
