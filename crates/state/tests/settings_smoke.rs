use serial_test::serial;
use tutelage_state::TutelageSettings;
use tutelage_test_utils::{env_guard, set_env_var, SettingsFixture};

#[test]
#[serial]
fn file_settings_then_env_overrides() {
    let _lock = env_guard();
    let fixture = SettingsFixture::new(
        r#"
        [matching]
        strong_skill_threshold = 0.6
        top_candidates = 8

        [recommender]
        underutilized_threshold = 4
        "#,
    )
    .unwrap();
    let _path = set_env_var("TUTELAGE_SETTINGS", fixture.path().to_str());
    let _top = set_env_var("TUTELAGE_TOP_CANDIDATES", Some("2"));
    let _window = set_env_var("TUTELAGE_HISTORY_WINDOW", Some("25"));
    let _threshold = set_env_var("TUTELAGE_STRONG_SKILL_THRESHOLD", None);
    let _under = set_env_var("TUTELAGE_UNDERUTILIZED_THRESHOLD", None);

    let settings = TutelageSettings::load().unwrap();
    assert_eq!(settings.matching.strong_skill_threshold, 0.6);
    assert_eq!(settings.matching.top_candidates, 2);
    assert_eq!(settings.recommender.underutilized_threshold, 4);
    assert_eq!(settings.recommender.history_window, Some(25));
}

#[test]
#[serial]
fn missing_file_uses_defaults() {
    let _lock = env_guard();
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.toml");
    let _path = set_env_var("TUTELAGE_SETTINGS", absent.to_str());
    let _top = set_env_var("TUTELAGE_TOP_CANDIDATES", None);
    let _window = set_env_var("TUTELAGE_HISTORY_WINDOW", None);
    let _threshold = set_env_var("TUTELAGE_STRONG_SKILL_THRESHOLD", None);
    let _under = set_env_var("TUTELAGE_UNDERUTILIZED_THRESHOLD", None);

    assert_eq!(TutelageSettings::load().unwrap(), TutelageSettings::default());
}

#[test]
#[serial]
fn history_window_all_clears_file_value() {
    let _lock = env_guard();
    let fixture = SettingsFixture::new("[recommender]\nhistory_window = 10\n").unwrap();
    let _path = set_env_var("TUTELAGE_SETTINGS", fixture.path().to_str());
    let _window = set_env_var("TUTELAGE_HISTORY_WINDOW", Some("all"));
    let _top = set_env_var("TUTELAGE_TOP_CANDIDATES", None);
    let _threshold = set_env_var("TUTELAGE_STRONG_SKILL_THRESHOLD", None);
    let _under = set_env_var("TUTELAGE_UNDERUTILIZED_THRESHOLD", None);

    let settings = TutelageSettings::load().unwrap();
    assert_eq!(settings.recommender.history_window, None);
}

#[test]
#[serial]
fn invalid_env_override_is_an_error() {
    let _lock = env_guard();
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.toml");
    let _path = set_env_var("TUTELAGE_SETTINGS", absent.to_str());
    let _threshold = set_env_var("TUTELAGE_STRONG_SKILL_THRESHOLD", Some("1.5"));
    let _top = set_env_var("TUTELAGE_TOP_CANDIDATES", None);
    let _window = set_env_var("TUTELAGE_HISTORY_WINDOW", None);
    let _under = set_env_var("TUTELAGE_UNDERUTILIZED_THRESHOLD", None);

    assert!(TutelageSettings::load().is_err());
}
