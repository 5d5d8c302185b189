//! HTTP API for the PDF text extraction service.
//!
//! One processing endpoint plus a health check. All pipeline failures are
//! translated into JSON error bodies by `PipelineError`'s `IntoResponse`
//! implementation; handlers never reclassify them.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::PipelineResult;
use crate::extractor::PdftotextExtractor;
use crate::pipeline::Pipeline;

/// Application state
pub struct AppState {
    pub pipeline: Pipeline<PdftotextExtractor>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: Pipeline<PdftotextExtractor>) -> Self {
        Self {
            pipeline,
            start_time: Instant::now(),
        }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route("/documents/extract-text", get(extract_text_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// === Text Extraction ===

/// Query parameters for text extraction
#[derive(Deserialize)]
pub struct ExtractTextParams {
    /// URL of the PDF file to process
    pub file: String,
}

/// Response for successful text extraction
#[derive(Serialize)]
pub struct ExtractTextResponse {
    pub data: Vec<String>,
}

async fn extract_text_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExtractTextParams>,
) -> PipelineResult<Json<ExtractTextResponse>> {
    info!(url = %params.file, "Extract-text request received");

    let data = state.pipeline.run(&params.file).await?;

    Ok(Json(ExtractTextResponse { data }))
}

// === Health ===

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
}
