//! `POST /api/analyze-pdf`: medical-report PDF analysis.
//!
//! Accepts a multipart upload (field name `pdf`), checks the magic bytes
//! and size, and forwards the document inline to the generative-AI API
//! for a plain-language summary. The file is never written to disk.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::gemini;
use crate::state::AppState;

/// Maximum accepted PDF size (10 MB, as the upload form advertises).
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

/// Request body cap for the route: the PDF plus multipart framing.
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_PDF_BYTES + 1024 * 1024;

#[derive(Serialize)]
pub struct AnalyzePdfResponse {
    pub report: String,
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzePdfResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("pdf") {
            let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((file_name, data.to_vec()));
            break;
        }
    }

    let (file_name, data) = upload.ok_or_else(|| ApiError::BadRequest("No file uploaded".into()))?;

    if data.len() > MAX_PDF_BYTES {
        return Err(ApiError::BadRequest(format!(
            "PDF exceeds the {} MB limit",
            MAX_PDF_BYTES / (1024 * 1024)
        )));
    }
    if !data.starts_with(b"%PDF-") {
        return Err(ApiError::BadRequest("Only PDF files are allowed".into()));
    }

    tracing::info!(file = %file_name, bytes = data.len(), "Analyzing uploaded PDF");

    let report = state
        .gemini
        .generate_with_pdf(gemini::PDF_ANALYSIS_PROMPT, &data)
        .await?;

    Ok(Json(AnalyzePdfResponse { report }))
}
