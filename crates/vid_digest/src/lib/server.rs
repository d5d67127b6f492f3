//! HTTP surface: `POST /summarize` and a readiness probe on `GET /`.
//!
//! Failures are always answered with a non-2xx status and a JSON body of the
//! form `{"detail": "...", "stage": "..."}`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::Error, yt::AudioHandler, Summarizer, SummaryPipeline, Transcriber};

#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryBody {
    pub summary: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] Error),
    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, stage) = match &self {
            ApiError::Pipeline(e) => (StatusCode::INTERNAL_SERVER_ERROR, Some(e.stage())),
            ApiError::InvalidRequest(rejection) => (rejection.status(), None),
        };
        let body = serde_json::json!({
            "detail": self.to_string(),
            "stage": stage,
        });

        (status, Json(body)).into_response()
    }
}

pub fn router<A, T, S>(pipeline: SummaryPipeline<A, T, S>, allowed_origins: Vec<HeaderValue>) -> Router
where
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", routing::get(health))
        .route("/summarize", routing::post(summarize::<A, T, S>))
        .with_state(Arc::new(pipeline))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "vid-digest is running" }))
}

async fn summarize<A, T, S>(
    State(pipeline): State<Arc<SummaryPipeline<A, T, S>>>,
    payload: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<SummaryBody>, ApiError>
where
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let Json(request) = payload.inspect_err(|e| tracing::warn!(error = %e, "Rejected request body"))?;

    let summary = pipeline
        .run(&request.url)
        .await
        .inspect_err(|e| tracing::error!(error = %e, stage = %e.stage(), "Request failed"))?;

    Ok(Json(SummaryBody { summary }))
}

/// Resolves once Ctrl-C is received
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
