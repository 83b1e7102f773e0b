#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_constants() {
    let config = EngineConfig::default();
    assert_eq!(config.handle_radius_px, HANDLE_RADIUS_PX);
    assert_eq!(config.rotate_handle_offset_px, ROTATE_HANDLE_OFFSET_PX);
    assert_eq!(config.min_scale, MIN_SCALE);
    assert_eq!(config.rotate_snap_deg, ROTATE_SNAP_DEG);
    assert_eq!(config.double_click_ms, DOUBLE_CLICK_MS);
    assert_eq!(config.background_size_threshold, BACKGROUND_SIZE_THRESHOLD);
    assert!(config.validate().is_ok());
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
}

#[test]
fn from_json_overrides_present_keys_only() {
    let config = EngineConfig::from_json(r#"{ "handle_radius_px": 12.0, "rotate_snap_deg": 45 }"#).unwrap();
    assert_eq!(config.handle_radius_px, 12.0);
    assert_eq!(config.rotate_snap_deg, 45.0);
    assert_eq!(config.min_scale, MIN_SCALE);
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = EngineConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid engine config JSON"));
}

#[test]
fn from_json_rejects_wrong_types() {
    let err = EngineConfig::from_json(r#"{ "min_scale": "tiny" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_json_rejects_non_positive_values() {
    let err = EngineConfig::from_json(r#"{ "min_scale": 0 }"#).unwrap_err();
    match err {
        ConfigError::NotPositive { field, value } => {
            assert_eq!(field, "min_scale");
            assert_eq!(value, 0.0);
        }
        ConfigError::Parse(e) => panic!("expected NotPositive, got parse error {e}"),
    }
}

#[test]
fn validate_names_first_bad_field() {
    let config = EngineConfig { handle_radius_px: -1.0, double_click_ms: f64::NAN, ..EngineConfig::default() };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { field: "handle_radius_px", .. }));
    assert_eq!(err.to_string(), "handle_radius_px must be a positive finite number, got -1");
}

#[test]
fn validate_rejects_infinity() {
    let config = EngineConfig { background_size_threshold: f64::INFINITY, ..EngineConfig::default() };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotPositive { field: "background_size_threshold", .. })
    ));
}

#[test]
fn config_serializes_every_field() {
    let value = serde_json::to_value(EngineConfig::default()).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 6);
    assert!(obj.contains_key("double_click_ms"));
}
