//! Generative model: prompt construction and the hosted Gemini client
//!
//! The model is only ever called after the analysis is computed. Any
//! failure is replaced by FALLBACK_RESPONSE so the risk signal still
//! reaches the user.

use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SymptomSummary;

pub const FALLBACK_RESPONSE: &str = "I'm having trouble connecting to my AI services right now. Please try again, or if this is urgent, please consult with a healthcare professional immediately.";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generative model API key is not configured")]
    NotConfigured,

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

/// Text generation backend
pub trait ResponseGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>>;

    /// Whether credentials are present (reported by the health endpoint)
    fn is_configured(&self) -> bool;
}

/// Prompt sent to the model for one user message
pub fn build_prompt(message: &str, symptoms: &[SymptomSummary]) -> String {
    let detected = if symptoms.is_empty() {
        "none detected".to_string()
    } else {
        symptoms
            .iter()
            .map(|s| format!("{} ({} severity)", s.name, s.severity))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "You are a compassionate AI healthcare assistant.\n\
         \n\
         User's message: \"{message}\"\n\
         Detected symptoms: {detected}\n\
         \n\
         Please provide:\n\
         1. An empathetic response to their concern\n\
         2. Relevant follow-up questions to better understand their condition\n\
         3. General health guidance (not diagnosis)\n\
         4. Appropriate recommendations for next steps\n\
         5. Always remind them to consult healthcare professionals for serious concerns\n\
         \n\
         Keep your response helpful, caring, and medically responsible."
    )
}

/// Call the generator, substituting the fallback text on any error
pub async fn generate_or_fallback(generator: &dyn ResponseGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Generative model unavailable, using fallback response");
            FALLBACK_RESPONSE.to_string()
        }
    }
}

// =============================================================================
// GEMINI
// =============================================================================

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Gemini `generateContent` over HTTPS
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

/// Request body for generateContent
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response body from generateContent
#[derive(Deserialize)]
struct GenerateContentResponse {
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

impl GeminiClient {
    pub fn new(mut config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::HttpClient(e.to_string()))?;

        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.api_key = config.api_key.filter(|k| !k.trim().is_empty());

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn call(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.config.api_key.as_deref().ok_or(GenerationError::NotConfigured)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = GenerateContentRequest {
            contents: [Content { parts: [Part { text: prompt }] }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    GenerationError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        extract_text(parsed)
    }
}

impl ResponseGenerator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>> {
        Box::pin(self.call(prompt))
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

/// Concatenated text of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
