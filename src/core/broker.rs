//! Registry of queues keyed by name.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{BrokerError, Job, JobDefaults, JobId, Queue, ScheduledJob};

/// Broker owning every registered queue.
///
/// The name-to-queue map sits behind its own `RwLock`, independent of each
/// queue's mutex. Lookups clone the `Arc<Queue>` and release the registry
/// lock before touching the queue, so no path holds both locks.
#[derive(Debug, Default)]
pub struct Broker {
    queues: RwLock<HashMap<String, Arc<Queue>>>,
    defaults: JobDefaults,
}

impl Broker {
    /// Create an empty broker using default job settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty broker stamping `defaults` onto the jobs it creates.
    pub fn with_defaults(defaults: JobDefaults) -> Self {
        Self {
            queues: RwLock::new(HashMap::new()),
            defaults,
        }
    }

    /// Register a new, empty queue.
    ///
    /// # Errors
    ///
    /// [`BrokerError::QueueAlreadyExists`] if the name is taken; the existing
    /// queue is left as it was.
    pub fn create_queue(&self, name: &str) -> Result<(), BrokerError> {
        match self.queues.write().entry(name.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(queue = name, "queue already exists");
                Err(BrokerError::QueueAlreadyExists(name.to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Queue::new(name)));
                tracing::info!(queue = name, "queue created");
                Ok(())
            }
        }
    }

    /// Look up a queue by name.
    ///
    /// # Errors
    ///
    /// [`BrokerError::QueueNotFound`] if no queue has that name.
    pub fn get_queue(&self, name: &str) -> Result<Arc<Queue>, BrokerError> {
        self.queues
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| BrokerError::QueueNotFound(name.to_string()))
    }

    /// Names of all registered queues, in no particular order.
    pub fn list_queues(&self) -> Vec<String> {
        self.queues.read().keys().cloned().collect()
    }

    /// Number of registered queues.
    pub fn queue_count(&self) -> usize {
        self.queues.read().len()
    }

    /// Push an already scheduled job onto a queue's pending stack.
    ///
    /// # Errors
    ///
    /// [`BrokerError::QueueNotFound`] if the queue is not registered, or
    /// [`BrokerError::DuplicateJob`] if the queue already holds this job.
    pub fn add_pending_job(&self, queue_name: &str, job: ScheduledJob) -> Result<(), BrokerError> {
        let queue = self.get_queue(queue_name).inspect_err(|_| {
            tracing::warn!(queue = queue_name, "submission to unknown queue");
        })?;
        queue.add_pending_job(job)
    }

    /// Wrap `payload` in a new scheduled job and submit it.
    ///
    /// # Errors
    ///
    /// [`BrokerError::QueueNotFound`] if the queue is not registered.
    pub fn submit_job(
        &self,
        queue_name: &str,
        payload: impl Into<String>,
    ) -> Result<JobId, BrokerError> {
        let job = ScheduledJob::with_defaults(Job::new(payload), self.defaults);
        let id = job.id();
        self.add_pending_job(queue_name, job)?;
        Ok(id)
    }
}
