//! Generative-AI proxy client.
//!
//! Thin request/response wrapper over the Gemini `generateContent` REST
//! endpoint. Two operations: free-text generation (health chat) and
//! generation with an attached PDF (report summarization). The service
//! is optional: without `GEMINI_API_KEY` the client constructs fine and
//! every call fails with `MissingApiKey`, which the API layer maps to a
//! 503.

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const CHAT_MAX_OUTPUT_TOKENS: u32 = 500;
const PDF_MAX_OUTPUT_TOKENS: u32 = 1024;
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("Cannot reach the AI service at {0}")]
    Connection(String),

    #[error("AI service request failed: {0}")]
    HttpClient(String),

    #[error("AI service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Could not parse AI response: {0}")]
    ResponseParsing(String),

    #[error("AI response contained no candidates")]
    EmptyResponse,
}

/// Gemini HTTP client.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client,
        }
    }

    /// Configure from `GEMINI_BASE_URL`, `GEMINI_MODEL`, `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::new(&base_url, &model, api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Free-text generation (health chat).
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        self.generate_parts(
            vec![Part::Text {
                text: prompt.to_string(),
            }],
            CHAT_MAX_OUTPUT_TOKENS,
        )
        .await
    }

    /// Generation with an attached PDF (sent inline as base64).
    pub async fn generate_with_pdf(
        &self,
        prompt: &str,
        pdf_bytes: &[u8],
    ) -> Result<String, GeminiError> {
        let data = base64::engine::general_purpose::STANDARD.encode(pdf_bytes);
        self.generate_parts(
            vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "application/pdf",
                        data,
                    },
                },
                Part::Text {
                    text: prompt.to_string(),
                },
            ],
            PDF_MAX_OUTPUT_TOKENS,
        )
        .await
    }

    async fn generate_parts(
        &self,
        parts: Vec<Part>,
        max_output_tokens: u32,
    ) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        // Key goes in the query string, never in logs
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens,
            },
        };

        tracing::debug!(endpoint = %url, "Calling generative AI API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GeminiError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    GeminiError::HttpClient(format!(
                        "Request timed out after {REQUEST_TIMEOUT_SECS}s"
                    ))
                } else {
                    GeminiError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ResponseParsing(e.to_string()))?;

        extract_text(parsed)
    }
}

/// First candidate's first text part, or `EmptyResponse`.
fn extract_text(response: GenerateResponse) -> Result<String, GeminiError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(GeminiError::EmptyResponse)
}

// ─── Prompts ──────────────────────────────────────────────────────────────────

/// Health-framed wrapper for free-text questions.
pub fn health_prompt(query: &str) -> String {
    format!(
        "You are a helpful health assistant. The user has asked: \"{query}\".\n\n\
         Please provide a clear, informative response about their health question. Keep in mind:\n\
         - Provide general health information and guidance\n\
         - Always recommend consulting healthcare professionals for serious concerns\n\
         - Be empathetic and supportive\n\
         - Keep responses concise but comprehensive\n\
         - Include disclaimers when appropriate\n\n\
         Response:"
    )
}

/// Instruction attached to uploaded medical-report PDFs.
pub const PDF_ANALYSIS_PROMPT: &str =
    "You are a medical report assistant. Read the attached medical report and write a \
     plain-language summary for the patient. Cover the key findings, any values outside their \
     reference ranges, and sensible next steps. Always recommend confirming the interpretation \
     with the treating doctor.";

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}
