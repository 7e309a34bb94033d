//! API-facing request/response models and the transport operations.
//!
//! Each function here is one operation a transport exposes. They resolve the
//! queue through the broker and delegate; no lifecycle logic lives here.

use serde::{Deserialize, Serialize};

use crate::core::{Broker, BrokerError, JobId, JobOutcome, ScheduledJob};

/// Queue creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQueueRequest {
    /// Name of the queue to register.
    pub name: String,
}

/// Job submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobRequest {
    /// Target queue.
    pub queue_name: String,
    /// Opaque job payload.
    pub payload: String,
}

/// Job submission response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    /// Identifier generated for the new job.
    pub uuid: JobId,
}

/// Completion report payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteJobRequest {
    /// Queue the job was released from.
    pub queue_name: String,
    /// Identifier of the running job.
    pub uuid: JobId,
    /// Reported outcome.
    pub status: JobOutcome,
}

/// Release response: a job, or the empty-queue flag. Never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseJobResponse {
    /// The released job, absent when the queue had nothing pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<ScheduledJob>,
    /// Set when nothing was pending.
    pub empty_queue: bool,
}

impl From<Option<ScheduledJob>> for ReleaseJobResponse {
    fn from(job: Option<ScheduledJob>) -> Self {
        let empty_queue = job.is_none();
        Self { job, empty_queue }
    }
}

/// Identifier and payload of a listed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// Job identifier.
    pub uuid: JobId,
    /// Job payload.
    pub payload: String,
}

impl From<&ScheduledJob> for JobInfo {
    fn from(job: &ScheduledJob) -> Self {
        Self {
            uuid: job.id(),
            payload: job.payload().to_string(),
        }
    }
}

/// Jobs of one queue, grouped by lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    /// Pending jobs, oldest first.
    pub pending: Vec<JobInfo>,
    /// Running jobs, unordered.
    pub running: Vec<JobInfo>,
    /// Completed jobs in completion order.
    pub completed: Vec<JobInfo>,
}

/// Job listing response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsResponse {
    /// The grouped jobs.
    pub jobs: JobListing,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Register a queue.
///
/// # Errors
///
/// [`BrokerError::QueueAlreadyExists`].
pub fn create_queue(broker: &Broker, req: &CreateQueueRequest) -> Result<(), BrokerError> {
    broker.create_queue(&req.name)
}

/// Submit a payload as a new job.
///
/// # Errors
///
/// [`BrokerError::QueueNotFound`].
pub fn submit_job(
    broker: &Broker,
    req: SubmitJobRequest,
) -> Result<SubmitJobResponse, BrokerError> {
    let uuid = broker.submit_job(&req.queue_name, req.payload)?;
    Ok(SubmitJobResponse { uuid })
}

/// Release the next job of a queue.
///
/// # Errors
///
/// [`BrokerError::QueueNotFound`].
pub fn release_job(broker: &Broker, queue_name: &str) -> Result<ReleaseJobResponse, BrokerError> {
    let queue = broker.get_queue(queue_name)?;
    Ok(queue.dequeue_job().into())
}

/// Report the outcome of a running job.
///
/// # Errors
///
/// [`BrokerError::QueueNotFound`] or [`BrokerError::JobNotFound`].
pub fn complete_job(broker: &Broker, req: &CompleteJobRequest) -> Result<(), BrokerError> {
    broker
        .get_queue(&req.queue_name)?
        .complete_job(req.uuid, req.status)
}

/// Names of all queues, unordered.
pub fn list_queues(broker: &Broker) -> Vec<String> {
    broker.list_queues()
}

/// Jobs of a queue grouped by state.
///
/// # Errors
///
/// [`BrokerError::QueueNotFound`].
pub fn list_jobs(broker: &Broker, queue_name: &str) -> Result<JobsResponse, BrokerError> {
    let snapshot = broker.get_queue(queue_name)?.snapshot();
    let infos =
        |jobs: &[ScheduledJob]| -> Vec<JobInfo> { jobs.iter().map(JobInfo::from).collect() };
    Ok(JobsResponse {
        jobs: JobListing {
            pending: infos(&snapshot.pending),
            running: infos(&snapshot.running),
            completed: infos(&snapshot.completed),
        },
    })
}

/// Return a health payload.
pub const fn health() -> Health {
    Health { ok: true }
}
