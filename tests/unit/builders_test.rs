//! Tests for builder modules

use job_broker::builders::build_broker;
use job_broker::config::BrokerConfig;

#[test]
fn test_build_broker_creates_declared_queues() {
    let cfg = BrokerConfig {
        queues: vec!["emails".into(), "reports".into()],
        ..BrokerConfig::default()
    };

    let broker = build_broker(&cfg).unwrap();
    let mut names = broker.list_queues();
    names.sort();
    assert_eq!(names, vec!["emails", "reports"]);
}

#[test]
fn test_build_broker_applies_job_defaults() {
    let cfg = BrokerConfig {
        default_timeout_secs: 15,
        default_max_attempts: 8,
        queues: vec!["q".into()],
        ..BrokerConfig::default()
    };

    let broker = build_broker(&cfg).unwrap();
    broker.submit_job("q", "payload").unwrap();
    let job = broker.get_queue("q").unwrap().dequeue_job().unwrap();
    assert_eq!(job.timeout_secs(), 15);
    assert_eq!(job.max_attempts(), 8);
}

#[test]
fn test_build_broker_rejects_invalid_config() {
    let cfg = BrokerConfig {
        queues: vec!["dup".into(), "dup".into()],
        ..BrokerConfig::default()
    };

    let err = build_broker(&cfg).unwrap_err();
    assert!(err.to_string().starts_with("config invalid"));
}
