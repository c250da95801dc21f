//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`, with a permissive CORS layer for the
//! browser client. No authentication: the service fronts a single-user
//! intake flow.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::endpoints::documents::MAX_UPLOAD_BODY_BYTES;
use crate::state::AppState;

/// Build the API router.
pub fn api_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/patients", post(endpoints::patients::save))
        .route("/patients/latest", get(endpoints::patients::latest))
        .route("/patients/latest/pdf", get(endpoints::patients::latest_pdf))
        .route("/assessments", post(endpoints::assessments::create))
        .route("/assessments/text", post(endpoints::assessments::export_text))
        .route("/assessments/pdf", post(endpoints::assessments::export_pdf))
        .route("/chat", post(endpoints::chat::send))
        .route(
            "/analyze-pdf",
            post(endpoints::documents::analyze)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        .with_state(state);

    Router::new().nest("/api", routes).layer(cors)
}
