//! Unit tests for configuration loading

use std::collections::HashMap;
use std::time::Duration;

use student_dashboard::config::{AppConfig, DEFAULT_FETCH_DELAY_MS, DEFAULT_PORT};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = AppConfig::from_lookup(lookup(&[]));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.fetch_delay, Duration::from_millis(DEFAULT_FETCH_DELAY_MS));
    assert_eq!(config.fetch_timeout, None);
}

#[test]
fn test_config_reads_overrides() {
    let config = AppConfig::from_lookup(lookup(&[
        ("PORT", "3000"),
        ("FETCH_DELAY_MS", "250"),
        ("FETCH_TIMEOUT_MS", "5000"),
    ]));
    assert_eq!(config.port, 3000);
    assert_eq!(config.fetch_delay, Duration::from_millis(250));
    assert_eq!(config.fetch_timeout, Some(Duration::from_millis(5000)));
}

#[test]
fn test_config_ignores_unparseable_values() {
    let config = AppConfig::from_lookup(lookup(&[
        ("PORT", "not-a-port"),
        ("FETCH_DELAY_MS", "-1"),
        ("FETCH_TIMEOUT_MS", "0"),
    ]));
    assert_eq!(config, AppConfig::default());
}
