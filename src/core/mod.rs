//! Core broker abstractions: the LIFO stack, jobs, queues, and the registry.

pub mod broker;
pub mod error;
pub mod job;
pub mod queue;
pub mod stack;

pub use broker::Broker;
pub use error::{AppResult, BrokerError};
pub use job::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS, Job, JobDefaults, JobId, JobOutcome, JobState,
    ScheduledJob, UnknownOutcome,
};
pub use queue::{Queue, QueueSnapshot};
pub use stack::Stack;
