//! Configuration tests
//!
//! Only `test_install_then_read_global` touches the process-global config;
//! everything else here works on local values.

use seqflow::config::{self, MAX_FLUSH_CAPACITY_HINT};
use seqflow::{Error, SequenceConfig};

#[test]
fn test_defaults() {
    let cfg = SequenceConfig::default();
    assert_eq!(cfg.flush_capacity_hint, 16);
    assert_eq!(cfg.linear_scan_warn_threshold, 4096);
    assert!(!cfg.trace_operators);
    cfg.validate().expect("defaults are valid");
}

#[test]
fn test_json_round_trip() {
    let cfg = SequenceConfig {
        flush_capacity_hint: 256,
        linear_scan_warn_threshold: 32,
        trace_operators: true,
    };
    let json = cfg.to_json().expect("serialize config");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["flush_capacity_hint"], 256);
    assert_eq!(value["trace_operators"], true);
    let back = SequenceConfig::from_json(&json).expect("parse config");
    assert_eq!(cfg, back);
}

#[test]
fn test_json_fills_missing_fields_with_defaults() {
    let cfg = SequenceConfig::from_json(r#"{"trace_operators": true}"#).expect("parse config");
    assert!(cfg.trace_operators);
    assert_eq!(cfg.flush_capacity_hint, 16);
}

#[test]
fn test_json_rejects_invalid_values() {
    let err = SequenceConfig::from_json(r#"{"linear_scan_warn_threshold": 0}"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let too_big = format!(r#"{{"flush_capacity_hint": {}}}"#, MAX_FLUSH_CAPACITY_HINT + 1);
    assert!(SequenceConfig::from_json(&too_big).is_err());

    let err = SequenceConfig::from_json("{not json").unwrap_err();
    assert!(err.to_string().starts_with("Invalid configuration"));
}

#[test]
fn test_install_then_read_global() {
    let cfg = SequenceConfig {
        flush_capacity_hint: 64,
        linear_scan_warn_threshold: 8,
        trace_operators: false,
    };
    let invalid = SequenceConfig {
        linear_scan_warn_threshold: 0,
        ..cfg.clone()
    };
    assert!(config::install(invalid).is_err());

    config::install(cfg.clone()).expect("first install succeeds");
    assert_eq!(config::global(), &cfg);
    assert!(config::install(SequenceConfig::default()).is_err());
}
