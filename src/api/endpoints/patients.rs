//! Patient intake endpoints.
//!
//! - `POST /api/patients`: save the intake form
//! - `GET /api/patients/latest`: current (most recent) profile
//! - `GET /api/patients/latest/pdf`: intake record as a PDF download

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::api::endpoints::attachment_response;
use crate::api::error::ApiError;
use crate::db::patients as store;
use crate::export;
use crate::models::{PatientDraft, PatientProfile};
use crate::state::AppState;

/// `POST /api/patients`: validate and store a new intake.
///
/// Every save is a new row; the newest row is the session's profile, so
/// resubmitting the form is how edits work (last write wins).
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<PatientDraft>,
) -> Result<(StatusCode, Json<PatientProfile>), ApiError> {
    draft.validate().map_err(ApiError::BadRequest)?;

    let profile = PatientProfile::from_draft(draft);
    let conn = state.open_db()?;
    store::insert_profile(&conn, &profile)?;

    tracing::info!(patient_id = %profile.id, "Patient profile saved");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /api/patients/latest`
pub async fn latest(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PatientProfile>, ApiError> {
    let conn = state.open_db()?;
    store::latest_profile(&conn)?
        .map(Json)
        .ok_or(ApiError::ProfileRequired)
}

/// `GET /api/patients/latest/pdf`
pub async fn latest_pdf(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let conn = state.open_db()?;
    let profile = store::latest_profile(&conn)?.ok_or(ApiError::ProfileRequired)?;

    let bytes = export::pdf::render_patient_record(&profile)?;
    let filename = export::suggested_filename(&profile, "patient_info", "pdf");
    Ok(attachment_response(bytes, "application/pdf", &filename))
}
