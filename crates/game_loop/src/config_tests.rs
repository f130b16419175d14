use super::*;
use crate::bots::BotKind;
use classical_engine::{EngineConfig, EvalProfile};

#[test]
fn test_empty_config_uses_defaults() {
    let config = PlayConfig::from_toml_str("").unwrap();
    assert_eq!(config, PlayConfig::default());
    assert_eq!(config.game.fen, STARTPOS_FEN);
    assert_eq!(config.game.max_moves, 200);
    assert_eq!(config.grace(), Duration::from_millis(500));
    assert_eq!(config.white.kind, BotKind::Minimax);
    assert_eq!(config.white.search, EngineConfig::default());
}

#[test]
fn test_full_config() {
    let config = PlayConfig::from_toml_str(
        r#"
        [game]
        fen = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - -"
        max_moves = 40

        [white]
        kind = "minimax"
        search = { max_depth = 4, move_time_ms = 2000, profile = "material" }

        [black]
        kind = "newborn"
        "#,
    )
    .unwrap();

    assert_eq!(config.game.max_moves, 40);
    assert_eq!(config.game.grace_ms, 500);
    assert_eq!(config.white.search.max_depth, 4);
    assert_eq!(config.white.search.profile, EvalProfile::Material);
    assert_eq!(config.white.search.move_time(), Duration::from_secs(2));
    assert_eq!(config.black.kind, BotKind::Newborn);
    assert!(config.start_position().unwrap().legal_moves().len() > 0);
}

#[test]
fn test_invalid_search_depth() {
    let err = PlayConfig::from_toml_str(
        r#"
        [black]
        search = { max_depth = 0 }
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, PlayError::Config(ConfigError::InvalidDepth(0))));
}

#[test]
fn test_unknown_bot_kind() {
    let err = PlayConfig::from_toml_str("[white]\nkind = \"deep blue\"").unwrap_err();
    assert!(matches!(err, PlayError::Config(ConfigError::Parse(_))));
}

#[test]
fn test_bad_fen() {
    let err = PlayConfig::from_toml_str("[game]\nfen = \"not a position\"").unwrap_err();
    assert!(matches!(err, PlayError::Fen(_)));
}

#[test]
fn test_missing_file() {
    let err = PlayConfig::load("/definitely/not/here/play.toml").unwrap_err();
    assert!(matches!(err, PlayError::Config(ConfigError::Io { .. })));
}
