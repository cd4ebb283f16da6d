//! HTTP server module for acta
//!
//! Exposes the transcription and minutes-generation endpoints.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{MinutesResponse, TranscriptionResponse};

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use crate::config::Settings;
use crate::llm::LlmProvider;
use crate::transcription::SpeechToText;

/// Shared application state passed to axum handlers.
///
/// Constructed once at startup; every field is read-only afterwards. Whisper
/// decode state is created per call inside the transcriber, so nothing here
/// needs locking.
#[derive(Clone)]
pub struct AppState {
    pub transcriber: Arc<dyn SpeechToText>,
    pub llm: Arc<dyn LlmProvider>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        transcriber: Arc<dyn SpeechToText>,
        llm: Arc<dyn LlmProvider>,
        settings: Settings,
    ) -> Self {
        Self {
            transcriber,
            llm,
            settings: Arc::new(settings),
        }
    }
}

/// Build the axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    // Multipart audio uploads can be several MB; raise the default extractor cap.
    let upload_limit = state.settings.server.max_upload_bytes;

    // The original service exposed trailing-slash paths and redirected the
    // bare spelling; here both are first-class routes.
    Router::new()
        .route(
            "/transcribe",
            post(handlers::transcribe_audio).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/transcribe/",
            post(handlers::transcribe_audio).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/generate_minutes", post(handlers::generate_minutes))
        .route("/generate_minutes/", post(handlers::generate_minutes))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind the listener and serve until the process is stopped.
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let router = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;

    tracing::info!(addr = %local_addr, "acta server listening");

    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}

/// Liveness endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": crate::APP_NAME,
        "version": crate::VERSION,
    }))
}
