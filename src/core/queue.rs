//! Per-queue job lifecycle: pending stack, running map, completed record.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use serde::Serialize;

use super::{BrokerError, JobId, JobOutcome, JobState, ScheduledJob, Stack};

/// The three containers a queue moves jobs between.
///
/// A job id lives in at most one of them at a time. `known` holds every id
/// the queue has ever accepted; ids are never released from it.
#[derive(Debug, Default)]
struct Lanes {
    pending: Stack<ScheduledJob>,
    running: HashMap<JobId, ScheduledJob>,
    completed: Vec<ScheduledJob>,
    known: HashSet<JobId>,
}

/// Point-in-time copy of a queue's jobs, taken under a single lock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    /// Pending jobs in storage order (oldest first; release order is reversed).
    pub pending: Vec<ScheduledJob>,
    /// Running jobs in no particular order.
    pub running: Vec<ScheduledJob>,
    /// Completed jobs in completion order.
    pub completed: Vec<ScheduledJob>,
}

/// A named queue managing one job lifecycle.
///
/// All operations take the queue's own mutex, so operations on one queue are
/// linearised while distinct queues never contend with each other.
#[derive(Debug)]
pub struct Queue {
    name: String,
    lanes: Mutex<Lanes>,
}

impl Queue {
    /// Create an empty queue.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lanes: Mutex::new(Lanes::default()),
        }
    }

    /// The queue's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Push a job onto the top of the pending stack.
    ///
    /// # Errors
    ///
    /// [`BrokerError::DuplicateJob`] if a job with the same id was already
    /// accepted by this queue, whatever state it is in now. Nothing is pushed.
    pub fn add_pending_job(&self, job: ScheduledJob) -> Result<(), BrokerError> {
        let id = job.id();
        let mut lanes = self.lanes.lock();
        if !lanes.known.insert(id) {
            drop(lanes);
            tracing::warn!(queue = %self.name, job_id = %id, "job already in queue");
            return Err(BrokerError::DuplicateJob(id));
        }
        lanes.pending.push(job);
        drop(lanes);

        tracing::debug!(queue = %self.name, job_id = %id, "job submitted");
        Ok(())
    }

    /// Release the most recently pushed pending job, marking it running.
    ///
    /// Returns `None` without mutating anything when nothing is pending.
    pub fn dequeue_job(&self) -> Option<ScheduledJob> {
        let mut lanes = self.lanes.lock();
        let job = lanes.pending.pop()?;
        lanes.running.insert(job.id(), job.clone());
        drop(lanes);

        tracing::debug!(queue = %self.name, job_id = %job.id(), "job released");
        Some(job)
    }

    /// Settle a running job.
    ///
    /// `Succeeded` appends it to the completed record; `Failed` pushes it back
    /// on top of the pending stack, unchanged.
    ///
    /// # Errors
    ///
    /// [`BrokerError::JobNotFound`] if `id` is not running in this queue. The
    /// queue is left untouched in that case.
    pub fn complete_job(&self, id: JobId, outcome: JobOutcome) -> Result<(), BrokerError> {
        let mut lanes = self.lanes.lock();
        let Some(job) = lanes.running.remove(&id) else {
            drop(lanes);
            tracing::warn!(
                queue = %self.name,
                job_id = %id,
                "completion for job that is not running"
            );
            return Err(BrokerError::JobNotFound(id));
        };

        match outcome {
            JobOutcome::Succeeded => lanes.completed.push(job),
            JobOutcome::Failed => lanes.pending.push(job),
        }
        drop(lanes);

        tracing::debug!(queue = %self.name, job_id = %id, ?outcome, "job settled");
        Ok(())
    }

    /// Clone of the job the next `dequeue_job` would release.
    pub fn peek_pending(&self) -> Option<ScheduledJob> {
        self.lanes.lock().pending.peek().cloned()
    }

    /// Where `id` currently sits in this queue, if anywhere.
    pub fn job_state(&self, id: JobId) -> Option<JobState> {
        let lanes = self.lanes.lock();
        if lanes.running.contains_key(&id) {
            Some(JobState::Running)
        } else if lanes.pending.items().iter().any(|j| j.id() == id) {
            Some(JobState::Pending)
        } else if lanes.completed.iter().any(|j| j.id() == id) {
            Some(JobState::Completed)
        } else {
            None
        }
    }

    /// Number of pending jobs.
    pub fn pending_len(&self) -> usize {
        self.lanes.lock().pending.len()
    }

    /// Number of running jobs.
    pub fn running_len(&self) -> usize {
        self.lanes.lock().running.len()
    }

    /// Number of completed jobs.
    pub fn completed_len(&self) -> usize {
        self.lanes.lock().completed.len()
    }

    /// Copy all three containers under one lock acquisition.
    pub fn snapshot(&self) -> QueueSnapshot {
        let lanes = self.lanes.lock();
        QueueSnapshot {
            pending: lanes.pending.items().to_vec(),
            running: lanes.running.values().cloned().collect(),
            completed: lanes.completed.clone(),
        }
    }
}
