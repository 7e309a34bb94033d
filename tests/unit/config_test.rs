//! Tests for configuration validation

use std::collections::HashMap;

use job_broker::config::broker::{
    ENV_BIND_ADDR, ENV_JOB_MAX_ATTEMPTS, ENV_JOB_TIMEOUT_SECS, ENV_QUEUES, ENV_WORKER_THREADS,
};
use job_broker::config::BrokerConfig;
use job_broker::core::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS};

fn valid() -> BrokerConfig {
    BrokerConfig {
        bind_addr: "127.0.0.1:8086".into(),
        worker_threads: 2,
        default_timeout_secs: 60,
        default_max_attempts: 3,
        queues: vec!["emails".into(), "reports".into()],
    }
}

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config_is_valid() {
    let cfg = BrokerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.bind_addr, "0.0.0.0:8086");
    assert_eq!(cfg.default_timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(cfg.default_max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert!(cfg.worker_threads > 0);
    assert!(cfg.queues.is_empty());
}

#[test]
fn test_broker_config_validation() {
    assert!(valid().validate().is_ok());
}

#[test]
fn test_invalid_bind_addr() {
    let mut cfg = valid();
    cfg.bind_addr = "  ".into();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_worker_threads() {
    let mut cfg = valid();
    cfg.worker_threads = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_timeout() {
    let mut cfg = valid();
    cfg.default_timeout_secs = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_max_attempts() {
    let mut cfg = valid();
    cfg.default_max_attempts = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_duplicate_queue_names_rejected() {
    let mut cfg = valid();
    cfg.queues.push("emails".into());
    let err = cfg.validate().unwrap_err();
    assert!(err.contains("emails"));
}

#[test]
fn test_empty_queue_name_rejected() {
    let mut cfg = valid();
    cfg.queues.push(String::new());
    assert!(cfg.validate().is_err());
}

#[test]
fn test_from_json_partial_uses_defaults() {
    let json = r#"{
        "bind_addr": "127.0.0.1:9000",
        "queues": ["emails"]
    }"#;

    let cfg = BrokerConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
    assert_eq!(cfg.queues, vec!["emails".to_string()]);
    assert_eq!(cfg.default_timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_from_json_rejects_garbage() {
    let err = BrokerConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_from_json_rejects_invalid_values() {
    assert!(BrokerConfig::from_json_str(r#"{ "default_max_attempts": 0 }"#).is_err());
}

#[test]
fn test_from_lookup_overrides() {
    let cfg = BrokerConfig::from_lookup(lookup_from(&[
        (ENV_BIND_ADDR, "127.0.0.1:7000"),
        (ENV_WORKER_THREADS, "3"),
        (ENV_JOB_TIMEOUT_SECS, "45"),
        (ENV_JOB_MAX_ATTEMPTS, "5"),
        (ENV_QUEUES, "a, b,,c "),
    ]))
    .unwrap();

    assert_eq!(cfg.bind_addr, "127.0.0.1:7000");
    assert_eq!(cfg.worker_threads, 3);
    assert_eq!(cfg.default_timeout_secs, 45);
    assert_eq!(cfg.default_max_attempts, 5);
    assert_eq!(cfg.queues, vec!["a", "b", "c"]);

    let defaults = cfg.job_defaults();
    assert_eq!(defaults.timeout_secs, 45);
    assert_eq!(defaults.max_attempts, 5);
}

#[test]
fn test_from_lookup_empty_gives_defaults() {
    let cfg = BrokerConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, BrokerConfig::default());
}

#[test]
fn test_from_lookup_bad_number() {
    let err =
        BrokerConfig::from_lookup(lookup_from(&[(ENV_JOB_TIMEOUT_SECS, "soon")])).unwrap_err();
    assert!(err.contains(ENV_JOB_TIMEOUT_SECS));
}
