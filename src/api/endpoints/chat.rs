//! `POST /api/chat`: AI health search proxy.
//!
//! Wraps the user's question in a health-framed prompt and forwards it
//! to the generative-AI API. Pure pass-through: nothing is stored.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::gemini;
use crate::state::AppState;

const MAX_QUERY_CHARS: usize = 2000;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub query: String,
}

pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Query is required".into()));
    }
    if query.len() > MAX_QUERY_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Query too long (max {MAX_QUERY_CHARS} chars)"
        )));
    }

    let prompt = gemini::health_prompt(query);
    let response = state.gemini.generate(&prompt).await?;

    Ok(Json(ChatResponse {
        response,
        query: query.to_string(),
    }))
}
