//! Job and scheduled-job types tracked through a queue's lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::util::clock::now_ms;

/// Default informational timeout stamped onto new jobs, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default informational attempt limit stamped onto new jobs.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Unique identifier for a scheduled job (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh identifier.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An immutable unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    payload: String,
}

impl Job {
    /// Wrap an opaque payload.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// The job's payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Timeout and attempt limit a broker stamps onto the jobs it creates.
///
/// Both values are carried as data only; nothing in the broker enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDefaults {
    /// Informational processing timeout in seconds.
    pub timeout_secs: u64,
    /// Informational maximum number of attempts.
    pub max_attempts: u32,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A job plus the runtime metadata tracked while it moves through a queue.
///
/// The identifier is assigned once at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledJob {
    #[serde(rename = "uuid")]
    id: JobId,
    job: Job,
    attempts: u32,
    timeout_secs: u64,
    created_at_ms: u128,
    max_attempts: u32,
}

impl ScheduledJob {
    /// Schedule a job with the default timeout and attempt limit.
    pub fn new(job: Job) -> Self {
        Self::with_defaults(job, JobDefaults::default())
    }

    /// Schedule a job with the given defaults.
    pub fn with_defaults(job: Job, defaults: JobDefaults) -> Self {
        Self {
            id: JobId::generate(),
            job,
            attempts: 0,
            timeout_secs: defaults.timeout_secs,
            created_at_ms: now_ms(),
            max_attempts: defaults.max_attempts,
        }
    }

    /// Override the informational timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Override the informational attempt limit.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Unique identifier.
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// The wrapped job.
    pub const fn job(&self) -> &Job {
        &self.job
    }

    /// Shortcut for `self.job().payload()`.
    pub fn payload(&self) -> &str {
        self.job.payload()
    }

    /// Attempt counter. Starts at zero and is not advanced by the broker.
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Informational timeout in seconds.
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Informational attempt limit.
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub const fn created_at_ms(&self) -> u128 {
        self.created_at_ms
    }
}

/// Outcome a worker reports for a running job.
///
/// Deserialisation goes through [`FromStr`], so only `"succeeded"` and
/// `"failed"` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum JobOutcome {
    /// The job finished; it moves to the completed record.
    Succeeded,
    /// The job failed; it goes back on top of the pending stack.
    Failed,
}

/// Returned when parsing a [`JobOutcome`] from an unrecognised string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job outcome: {0}")]
pub struct UnknownOutcome(pub String);

impl FromStr for JobOutcome {
    type Err = UnknownOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "succeeded" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownOutcome(other.to_string())),
        }
    }
}

impl TryFrom<String> for JobOutcome {
    type Error = UnknownOutcome;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Lifecycle state of a job within its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Waiting on the pending stack.
    Pending,
    /// Released to a worker and awaiting an outcome.
    Running,
    /// Reported successful. Terminal.
    Completed,
}

impl JobState {
    /// Lower-case name for display.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
