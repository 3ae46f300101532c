use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::Instrument;

use stowage_core::models::UploadReceipt;
use stowage_core::traits::{IObjectStore, IStressWorker};
use stowage_observability::upload_span;

use crate::error::ApiError;
use crate::state::AppState;

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub fn router<S, W>(state: AppState<S, W>, max_upload_bytes: usize) -> Router
where
    S: IObjectStore + 'static,
    W: IStressWorker,
{
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::<S, W>))
        .route(
            "/upload",
            post(upload::<S, W>).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/test", get(stress::<S, W>))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn metrics<S, W>(
    State(state): State<AppState<S, W>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state.registry.snapshot()?;
    Ok(([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body))
}

/// Stores the first multipart part that carries a file name.
async fn upload<S, W>(
    State(state): State<AppState<S, W>>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, ApiError>
where
    S: IObjectStore + 'static,
    W: IStressWorker,
{
    while let Some(field) = multipart.next_field().await.map_err(ApiError::multipart)? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let body = field.bytes().await.map_err(ApiError::multipart)?;
        let receipt = state
            .uploads
            .upload(&filename, body)
            .instrument(upload_span!(filename))
            .await?;
        return Ok(Json(receipt));
    }
    Err(ApiError::MissingFile)
}

async fn stress<S, W>(State(state): State<AppState<S, W>>) -> String
where
    W: IStressWorker,
{
    state.stress.launch().acknowledgment()
}
