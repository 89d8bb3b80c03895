//! SewStudio API Server
//!
//! Usage: cargo run --features api --bin sewstudio-api

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sewstudio_core::{
    config::StudioConfig, handle_generate, pipeline::PackPipeline, InferenceRequest, PipelineError,
    ServiceError,
};

#[derive(Clone)]
struct AppState {
    pipeline: Arc<PackPipeline>,
}

struct AppError(PipelineError);

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        Self(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        Self(PipelineError::Request(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            PipelineError::Request(e) => (
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST),
                e.body(),
            ),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate", post(generate))
        .route("/pack", post(pack))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": sewstudio_core::ENGINE_VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Raw body so malformed JSON maps to our own client error.
async fn generate(body: String) -> Result<impl IntoResponse, AppError> {
    Ok(Json(handle_generate(&body)?))
}

async fn pack(State(state): State<AppState>, body: String) -> Result<Response, AppError> {
    let request = InferenceRequest::parse(&body)?;
    let pack = state.pipeline.compile_pack(&request)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", pack.document.filename),
        ),
    ];
    Ok((headers, pack.document.bytes).into_response())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StudioConfig::load(&StudioConfig::resolve_path(None))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=debug", config.log_filter).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let state = AppState {
        pipeline: Arc::new(PackPipeline::from_config(&config)),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, studio = %config.studio_name, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
