//! Broker and server configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS, JobDefaults};

/// Environment variable for the listen address.
pub const ENV_BIND_ADDR: &str = "BROKER_BIND_ADDR";
/// Environment variable for the tokio worker thread count.
pub const ENV_WORKER_THREADS: &str = "BROKER_WORKER_THREADS";
/// Environment variable for the default job timeout in seconds.
pub const ENV_JOB_TIMEOUT_SECS: &str = "BROKER_JOB_TIMEOUT_SECS";
/// Environment variable for the default job attempt limit.
pub const ENV_JOB_MAX_ATTEMPTS: &str = "BROKER_JOB_MAX_ATTEMPTS";
/// Environment variable listing queues to create at startup, comma separated.
pub const ENV_QUEUES: &str = "BROKER_QUEUES";

/// Root broker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Number of tokio worker threads serving requests.
    pub worker_threads: usize,
    /// Timeout stamped onto new jobs (informational).
    pub default_timeout_secs: u64,
    /// Attempt limit stamped onto new jobs (informational).
    pub default_max_attempts: u32,
    /// Queues created when the broker is built.
    pub queues: Vec<String>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8086".into(),
            worker_threads: num_cpus::get(),
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_max_attempts: DEFAULT_MAX_ATTEMPTS,
            queues: Vec::new(),
        }
    }
}

impl BrokerConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// A message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.bind_addr.trim().is_empty() {
            return Err("bind_addr must not be empty".into());
        }
        if self.worker_threads == 0 {
            return Err("worker_threads must be greater than 0".into());
        }
        if self.default_timeout_secs == 0 {
            return Err("default_timeout_secs must be greater than 0".into());
        }
        if self.default_max_attempts == 0 {
            return Err("default_max_attempts must be greater than 0".into());
        }
        let mut seen = HashSet::new();
        for name in &self.queues {
            if name.trim().is_empty() {
                return Err("queue names must not be empty".into());
            }
            if !seen.insert(name.as_str()) {
                return Err(format!("queue `{name}` declared more than once"));
            }
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Parse failures and validation failures, as messages.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists.
    ///
    /// # Errors
    ///
    /// Unparseable values and validation failures, as messages.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, over the defaults.
    ///
    /// # Errors
    ///
    /// Unparseable values and validation failures, as messages.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            cfg.bind_addr = addr;
        }
        if let Some(raw) = lookup(ENV_WORKER_THREADS) {
            cfg.worker_threads = parse_var(ENV_WORKER_THREADS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_JOB_TIMEOUT_SECS) {
            cfg.default_timeout_secs = parse_var(ENV_JOB_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_JOB_MAX_ATTEMPTS) {
            cfg.default_max_attempts = parse_var(ENV_JOB_MAX_ATTEMPTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_QUEUES) {
            cfg.queues = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Job settings a broker built from this config stamps onto new jobs.
    pub const fn job_defaults(&self) -> JobDefaults {
        JobDefaults {
            timeout_secs: self.default_timeout_secs,
            max_attempts: self.default_max_attempts,
        }
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| format!("{key} invalid ({raw:?}): {e}"))
}
