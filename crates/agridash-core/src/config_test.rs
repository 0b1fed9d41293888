use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "AGRIDASH_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.locationiq_api_key.is_none());
    assert_eq!(cfg.geocoder_base_url, "https://us1.locationiq.com/v1/");
    assert_eq!(cfg.geocoder_timeout_secs, 30);
    assert_eq!(cfg.geocoder_result_limit, 30);
    assert_eq!(
        cfg.remote_failure_policy,
        RemoteFailurePolicy::UseFallbackOnly
    );
    assert_eq!(
        cfg.trusted_shops_path.to_str(),
        Some("./config/trusted_shops.yaml")
    );
    assert_eq!(cfg.default_location, Coordinate::new(13.0487, 80.2461));
    assert_eq!(cfg.geolocation_timeout_secs, 15);
    assert_eq!(cfg.advisory_base_url, "http://localhost:8000/api/");
    assert_eq!(cfg.advisory_timeout_secs, 60);
    assert_eq!(cfg.default_district, "Chennai");
    assert_eq!(cfg.inventory_dir.to_str(), Some("./data/inventory"));
    assert_eq!(cfg.storage_quota_bytes, 5_242_880);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("AGRIDASH_ENV", "production");
    map.insert("LOCATIONIQ_API_KEY", "pk.test");
    map.insert("AGRIDASH_GEOCODER_RESULT_LIMIT", "50");
    map.insert("AGRIDASH_REMOTE_FAILURE_POLICY", "propagate");
    map.insert("AGRIDASH_DEFAULT_LAT", "11.0168");
    map.insert("AGRIDASH_DEFAULT_LON", "76.9558");
    map.insert("AGRIDASH_DEFAULT_DISTRICT", "Coimbatore");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.locationiq_api_key.as_deref(), Some("pk.test"));
    assert_eq!(cfg.geocoder_result_limit, 50);
    assert_eq!(cfg.remote_failure_policy, RemoteFailurePolicy::Propagate);
    assert_eq!(cfg.default_location, Coordinate::new(11.0168, 76.9558));
    assert_eq!(cfg.default_district, "Coimbatore");
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    let mut map = HashMap::new();
    map.insert("LOCATIONIQ_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.locationiq_api_key.is_none());
}

#[test]
fn result_limit_below_minimum_is_rejected() {
    let mut map = HashMap::new();
    map.insert("AGRIDASH_GEOCODER_RESULT_LIMIT", "10");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGRIDASH_GEOCODER_RESULT_LIMIT"),
        "expected InvalidEnvVar(AGRIDASH_GEOCODER_RESULT_LIMIT), got: {result:?}"
    );
}

#[test]
fn non_numeric_timeout_is_rejected() {
    let mut map = HashMap::new();
    map.insert("AGRIDASH_GEOCODER_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGRIDASH_GEOCODER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(AGRIDASH_GEOCODER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn unknown_failure_policy_is_rejected() {
    let mut map = HashMap::new();
    map.insert("AGRIDASH_REMOTE_FAILURE_POLICY", "ignore");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGRIDASH_REMOTE_FAILURE_POLICY"),
        "expected InvalidEnvVar(AGRIDASH_REMOTE_FAILURE_POLICY), got: {result:?}"
    );
}

#[test]
fn out_of_range_default_location_is_rejected() {
    let mut map = HashMap::new();
    map.insert("AGRIDASH_DEFAULT_LAT", "123.0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AGRIDASH_DEFAULT_LAT"),
        "expected InvalidEnvVar(AGRIDASH_DEFAULT_LAT), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("LOCATIONIQ_API_KEY", "pk.secret-value");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("pk.secret-value"));
    assert!(rendered.contains("[redacted]"));
}
