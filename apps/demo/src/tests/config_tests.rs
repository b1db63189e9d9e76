use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use super::{apply_env, apply_file, load_settings, Settings};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_the_page_timings() {
    let settings = Settings::default();
    let timings = settings.timings();
    assert_eq!(timings.recommendation_delay, Duration::from_millis(1000));
    assert_eq!(timings.submission_delay, Duration::from_millis(2000));
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "recommendation_delay_ms = 0\nsubmission_delay_ms = 250\ncustomer_name = \"Emma Wilson\"\n",
    )
    .expect("apply file");

    assert_eq!(settings.recommendation_delay_ms, 0);
    assert_eq!(settings.submission_delay_ms, 250);
    assert_eq!(settings.customer_name, "Emma Wilson");
    assert_eq!(settings.event_capacity, 64);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "bind_addr = \"0.0.0.0:1\"\n").is_err());
}

#[test]
fn app_prefix_wins_over_product_prefix() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("SMARTDELIVER_SUBMISSION_DELAY_MS", "10"),
            ("APP__SUBMISSION_DELAY_MS", "20"),
            ("SMARTDELIVER_LOG_FILTER", "debug"),
        ]),
    )
    .expect("apply env");

    assert_eq!(settings.submission_delay_ms, 20);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn malformed_numbers_are_reported() {
    let mut settings = Settings::default();
    let err = apply_env(
        &mut settings,
        env_from(&[("APP__EVENT_CAPACITY", "lots")]),
    )
    .expect_err("not a number");
    assert!(format!("{err:#}").contains("EVENT_CAPACITY"));
}

#[test]
fn explicit_config_path_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("smartdeliver_config_test_{suffix}.toml"));
    fs::write(&path, "collaborator_timeout_ms = 1500\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load settings");
    assert_eq!(
        settings.timings().collaborator_timeout,
        Duration::from_millis(1500)
    );

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_explicit_config_path_fails() {
    let path = env::temp_dir().join("smartdeliver_config_missing.toml");
    assert!(load_settings(Some(&path)).is_err());
}
