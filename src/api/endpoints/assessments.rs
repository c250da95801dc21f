//! Risk assessment endpoints.
//!
//! - `POST /api/assessments`: run the engine, return the report as JSON
//! - `POST /api/assessments/text`: same report as a plain-text download
//! - `POST /api/assessments/pdf`: same report as a PDF download
//!
//! All three require a saved patient profile; without one they
//! short-circuit with `PROFILE_REQUIRED` before the engine is invoked.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::api::endpoints::attachment_response;
use crate::api::error::ApiError;
use crate::assessment::{self, Report};
use crate::db::patients as store;
use crate::export;
use crate::models::{AssessmentInput, PatientProfile};
use crate::state::AppState;

fn validate_input(input: &AssessmentInput) -> Result<(), ApiError> {
    if !input.vitals.all_non_negative() {
        return Err(ApiError::BadRequest(
            "Vitals must be non-negative numbers".into(),
        ));
    }
    Ok(())
}

/// Engine precondition: a resolved profile. The store's newest row wins.
fn resolve_profile(state: &AppState) -> Result<PatientProfile, ApiError> {
    let conn = state.open_db()?;
    store::latest_profile(&conn)?.ok_or(ApiError::ProfileRequired)
}

fn build_report(state: &AppState, input: &AssessmentInput) -> Result<Report, ApiError> {
    validate_input(input)?;
    let profile = resolve_profile(state)?;
    let report = assessment::generate_report(&profile, input);
    tracing::info!(
        report_id = %report.id,
        score = report.score.value,
        tier = report.tier.as_str(),
        "Assessment report generated"
    );
    Ok(report)
}

/// `POST /api/assessments`
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AssessmentInput>,
) -> Result<Json<Report>, ApiError> {
    build_report(&state, &input).map(Json)
}

/// `POST /api/assessments/text`
pub async fn export_text(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AssessmentInput>,
) -> Result<Response, ApiError> {
    let report = build_report(&state, &input)?;
    let body = export::text::render_report(&report);
    let filename = export::suggested_filename(&report.patient, "risk_report", "txt");
    Ok(attachment_response(
        body.into_bytes(),
        "text/plain; charset=utf-8",
        &filename,
    ))
}

/// `POST /api/assessments/pdf`
pub async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AssessmentInput>,
) -> Result<Response, ApiError> {
    let report = build_report(&state, &input)?;
    let bytes = export::pdf::render_report(&report)?;
    let filename = export::suggested_filename(&report.patient, "risk_report", "pdf");
    Ok(attachment_response(bytes, "application/pdf", &filename))
}
