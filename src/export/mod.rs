//! Export adapters: read-only renderings of an assessment report (or a
//! patient intake record) as plain text or PDF bytes.

pub mod pdf;
pub mod text;

use chrono::Utc;
use thiserror::Error;

use crate::models::PatientProfile;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF write error: {0}")]
    Write(String),
}

/// Download filename: `{First}_{Last}_{kind}_{YYYY-MM-DD}.{ext}`.
pub fn suggested_filename(profile: &PatientProfile, kind: &str, ext: &str) -> String {
    let first = if profile.first_name.trim().is_empty() {
        "Patient"
    } else {
        profile.first_name.trim()
    };
    let last = if profile.last_name.trim().is_empty() {
        "Record"
    } else {
        profile.last_name.trim()
    };
    format!(
        "{}_{}_{}_{}.{}",
        first,
        last,
        kind,
        Utc::now().format("%Y-%m-%d"),
        ext
    )
}
