//! # Job Broker
//!
//! An in-memory work-queue broker. Callers create named queues, submit jobs
//! into them, pull jobs out for processing, and report success or failure.
//!
//! ## Lifecycle
//!
//! Every job sits in exactly one of three places inside its queue:
//!
//! - **pending**: a last-in-first-out stack; the most recent submission is
//!   released first
//! - **running**: released to a worker, keyed by job id
//! - **completed**: append-only record, in completion order
//!
//! ```text
//! submit ──▶ pending ──release──▶ running ──succeeded──▶ completed
//!               ▲                    │
//!               └──────failed────────┘
//! ```
//!
//! There is no retry limit and no timeout sweep: attempt counters and
//! timeouts are carried on each job as data only.
//!
//! ## Concurrency
//!
//! The [`core::Broker`] registry and every [`core::Queue`] have independent
//! `parking_lot` locks. Operations on one queue are linearised; operations on
//! different queues never contend. All core operations are synchronous.
//!
//! ```rust
//! use job_broker::core::{Broker, JobOutcome};
//!
//! let broker = Broker::new();
//! broker.create_queue("emails").unwrap();
//! broker.submit_job("emails", "first").unwrap();
//! broker.submit_job("emails", "second").unwrap();
//!
//! let queue = broker.get_queue("emails").unwrap();
//! let job = queue.dequeue_job().unwrap();
//! assert_eq!(job.payload(), "second");
//!
//! queue.complete_job(job.id(), JobOutcome::Succeeded).unwrap();
//! assert_eq!(queue.completed_len(), 1);
//! ```
//!
//! ## HTTP
//!
//! With the default `http` feature, [`runtime::http`] serves the broker as a
//! JSON API and the `job-broker` binary runs it, configured from the
//! environment (see [`config::BrokerConfig::from_env`]).

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Stack, jobs, queues, the broker registry, and their errors.
pub mod core;
/// Configuration models for the broker and its server.
pub mod config;
/// Builders to construct a broker from configuration.
pub mod builders;
/// API models and transport.
pub mod runtime;
/// Shared utilities.
pub mod util;
