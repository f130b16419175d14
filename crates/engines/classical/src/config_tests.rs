use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.max_depth, 6);
    assert_eq!(config.move_time(), Duration::from_secs(5));
}

#[test]
fn test_partial_config() {
    let config = EngineConfig::from_toml_str(
        r#"
        max_depth = 4
        profile = "aggressive"
        quiescence_checks = true
        "#,
    )
    .unwrap();
    assert_eq!(config.max_depth, 4);
    assert_eq!(config.profile, EvalProfile::Aggressive);
    assert!(config.quiescence_checks);
    assert_eq!(config.tt_capacity, DEFAULT_CAPACITY);
}

#[test]
fn test_depth_out_of_range() {
    let err = EngineConfig::from_toml_str("max_depth = 0").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDepth(0)));

    let err = EngineConfig::from_toml_str("max_depth = 33").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDepth(33)));
}

#[test]
fn test_unknown_profile_is_a_parse_error() {
    let err = EngineConfig::from_toml_str(r#"profile = "reckless""#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file() {
    let err = EngineConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.toml"));
}

#[test]
fn test_presets() {
    assert_eq!(EngineConfig::quick().max_depth, 3);
    assert_eq!(EngineConfig::quick().move_time(), Duration::from_secs(5));
    assert_eq!(EngineConfig::strong().max_depth, 5);
    assert_eq!(EngineConfig::strong().move_time(), Duration::from_secs(10));
}

