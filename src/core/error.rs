//! Error types for broker operations.

use thiserror::Error;

use super::JobId;

/// Errors produced by the broker registry and its queues.
///
/// Every variant is a recoverable, value-level failure; none of them leaves a
/// queue or the registry partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokerError {
    /// A queue with this name is already registered.
    #[error("queue already exists: {0}")]
    QueueAlreadyExists(String),
    /// No queue is registered under this name.
    #[error("queue not found: {0}")]
    QueueNotFound(String),
    /// The job is not currently running in the queue.
    #[error("job not found: {0}")]
    JobNotFound(JobId),
    /// A job with this id was already accepted by the queue.
    #[error("job already in queue: {0}")]
    DuplicateJob(JobId),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
