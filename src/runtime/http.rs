//! JSON-over-HTTP transport built on axum.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{AppResult, Broker, BrokerError};
use crate::runtime::api::{
    self, CompleteJobRequest, CreateQueueRequest, Health, JobsResponse, ReleaseJobResponse,
    SubmitJobRequest, SubmitJobResponse,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The broker every request operates on.
    pub broker: Arc<Broker>,
}

/// Query string naming a queue.
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    /// Queue name.
    pub queue: String,
}

/// Broker failure surfaced over HTTP.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub BrokerError);

impl ApiError {
    /// Status code for the wrapped failure.
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            BrokerError::QueueAlreadyExists(_) | BrokerError::DuplicateJob(_) => {
                StatusCode::CONFLICT
            }
            BrokerError::QueueNotFound(_) | BrokerError::JobNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the router exposing every broker operation.
pub fn router(broker: Arc<Broker>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/create_queue", post(create_queue))
        .route("/job", get(release_job).post(submit_job))
        .route("/complete_job", post(complete_job))
        .route("/queues", get(list_queues))
        .route("/jobs", get(list_jobs))
        .with_state(AppState { broker })
}

/// Bind a listener on `addr`. Port 0 picks an ephemeral port.
///
/// # Errors
///
/// The address cannot be bound.
pub async fn bind(addr: &str) -> AppResult<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))
}

/// Serve on an existing listener until `shutdown` resolves.
///
/// # Errors
///
/// I/O failures from the listener.
pub async fn serve_on<F>(listener: TcpListener, broker: Arc<Broker>, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    tracing::info!(%local, "broker listening");
    axum::serve(listener, router(broker))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("broker stopped");
    Ok(())
}

/// Bind `addr` and serve until ctrl-c.
///
/// # Errors
///
/// Bind or I/O failures.
pub async fn serve(broker: Arc<Broker>, addr: &str) -> AppResult<()> {
    let listener = bind(addr).await?;
    serve_on(listener, broker, ctrl_c()).await
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn health() -> Json<Health> {
    Json(api::health())
}

async fn create_queue(
    State(state): State<AppState>,
    Json(req): Json<CreateQueueRequest>,
) -> Result<StatusCode, ApiError> {
    api::create_queue(&state.broker, &req)?;
    Ok(StatusCode::CREATED)
}

async fn submit_job(
    State(state): State<AppState>,
    Json(req): Json<SubmitJobRequest>,
) -> Result<(StatusCode, Json<SubmitJobResponse>), ApiError> {
    let resp = api::submit_job(&state.broker, req)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn release_job(
    State(state): State<AppState>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<ReleaseJobResponse>, ApiError> {
    Ok(Json(api::release_job(&state.broker, &query.queue)?))
}

async fn complete_job(
    State(state): State<AppState>,
    Json(req): Json<CompleteJobRequest>,
) -> Result<StatusCode, ApiError> {
    api::complete_job(&state.broker, &req)?;
    Ok(StatusCode::OK)
}

async fn list_queues(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(api::list_queues(&state.broker))
}

async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<JobsResponse>, ApiError> {
    Ok(Json(api::list_jobs(&state.broker, &query.queue)?))
}
