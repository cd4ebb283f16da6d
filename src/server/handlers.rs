//! Request handlers for the two service endpoints.

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::llm::MinutesRequest;
use crate::pdf;
use crate::server::{ApiError, AppState};
use crate::transcription::load_audio;

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

#[derive(Debug, Serialize)]
pub struct MinutesResponse {
    pub meeting_minutes: String,
    pub pdf: String,
}

#[derive(Debug, Deserialize)]
pub struct MinutesQuery {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MinutesBody {
    text: String,
}

/// POST /transcribe/ — multipart upload, field `file`.
pub async fn transcribe_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.wav").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload
        .ok_or_else(|| ApiError::Validation("Missing multipart field 'file'".to_string()))?;

    tracing::info!(filename = %filename, size = bytes.len(), "received transcribe request");

    // Per-request unique transient path. The guard's Drop removes the file on
    // every exit path, including decode and inference failures.
    let temp = persist_upload(&state, &filename, &bytes)?;

    let transcriber = state.transcriber.clone();
    let transcription = tokio::task::spawn_blocking(move || {
        let samples = load_audio(temp.path())?;
        transcriber.transcribe(&samples)
        // `temp` dropped here, deleting the transient file
    })
    .await
    .context("Transcription task panicked")??;

    tracing::info!(chars = transcription.len(), "transcription completed");

    Ok(Json(TranscriptionResponse { transcription }))
}

/// POST /generate_minutes/ — `text` as query parameter or JSON body.
pub async fn generate_minutes(
    State(state): State<AppState>,
    Query(query): Query<MinutesQuery>,
    body: Bytes,
) -> Result<Json<MinutesResponse>, ApiError> {
    let text = match query.text {
        Some(text) => text,
        None if !body.is_empty() => serde_json::from_slice::<MinutesBody>(&body)
            .map(|b| b.text)
            .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {e}")))?,
        None => {
            return Err(ApiError::Validation(
                "Missing required parameter 'text'".to_string(),
            ))
        }
    };

    let date = Local::now().date_naive();
    let date_str = date.format("%Y-%m-%d").to_string();

    tracing::info!(chars = text.len(), "generating meeting minutes");

    let meeting_minutes = state
        .llm
        .generate_minutes(MinutesRequest {
            date: &date_str,
            transcript: &text,
        })
        .await?;

    let output_dir = &state.settings.minutes.output_dir;
    std::fs::create_dir_all(output_dir).context("Failed to create minutes output directory")?;

    // Keyed only by date: a same-day regeneration overwrites the earlier file.
    let filename = pdf::minutes_filename(date);
    let path = output_dir.join(&filename);
    pdf::render_minutes(&meeting_minutes, &path)?;

    tracing::info!(pdf = %path.display(), "meeting minutes saved");

    Ok(Json(MinutesResponse {
        meeting_minutes,
        pdf: filename,
    }))
}

/// Write uploaded bytes to a uniquely named file in the upload directory.
///
/// The original extension is kept so the decoder can see the container type;
/// the rest of the name is randomized per request.
fn persist_upload(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> Result<NamedTempFile, ApiError> {
    let upload_dir = state.settings.upload_dir();
    std::fs::create_dir_all(&upload_dir).context("Failed to create upload directory")?;

    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let suffix = Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| ".wav".to_string());

    let mut temp = tempfile::Builder::new()
        .prefix(&format!("{stem}-"))
        .suffix(&suffix)
        .tempfile_in(&upload_dir)
        .context("Failed to create transient upload file")?;

    temp.write_all(bytes)
        .context("Failed to write transient upload file")?;

    Ok(temp)
}
