pub mod assessments;
pub mod chat;
pub mod documents;
pub mod health;
pub mod patients;

use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Byte-stream response with a download filename.
pub(crate) fn attachment_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    filename: &str,
) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
