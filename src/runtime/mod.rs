//! Transport surface: API models and, with the `http` feature, the server.

pub mod api;
#[cfg(feature = "http")]
pub mod http;

pub use api::{
    CompleteJobRequest, CreateQueueRequest, JobInfo, JobListing, JobsResponse, ReleaseJobResponse,
    SubmitJobRequest, SubmitJobResponse,
};
