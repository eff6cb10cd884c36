//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::StructuredRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: String,
    pub extracted_info: StructuredRecord,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub extracted_info: StructuredRecord,
}

/// The parts of the upload form the handler cares about.
#[derive(Debug, Default)]
struct UploadForm {
    username: Option<String>,
    file_name: Option<String>,
    file: Option<Bytes>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload
///
/// Multipart form with a `file` (PDF) and a `username`. Runs the extraction
/// pipeline and stores the record under the username, replacing any earlier one.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart).await?;

    let (Some(file), Some(username)) = (form.file, form.username) else {
        return Err(AppError::Validation(
            "No file part or username in the request".to_string(),
        ));
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Validation("Username must not be empty".to_string()));
    }

    let file_name = form.file_name.unwrap_or_default();
    if file_name.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    if !file_name.ends_with(".pdf") {
        return Err(AppError::Validation(
            "Invalid file format. Please upload a PDF.".to_string(),
        ));
    }

    let size = file.len();
    let record = state.pipeline.run(file).await?;
    state.store.put(&username, record.clone()).await?;

    info!("Extracted and stored resume for '{username}' from {file_name} ({size} bytes)");

    Ok(Json(UploadResponse {
        success: "File uploaded and data saved successfully".to_string(),
        extracted_info: record,
    }))
}

/// GET /resume/:username
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    let stored = state
        .store
        .get(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume data not found".to_string()))?;

    Ok(Json(ResumeResponse {
        extracted_info: stored.record,
    }))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?,
                );
            }
            "username" => {
                form.username = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Could not read username: {e}")))?,
                );
            }
            _ => {}
        }
    }

    Ok(form)
}
