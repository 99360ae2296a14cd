//! HTTP API for Carebot
//!
//! Endpoints:
//! - POST /api/chat - Analyze a message and compose a reply
//! - GET /api/analytics - Knowledge base summary
//! - GET /api/health-tips - Three random health tips
//! - GET /api/health - Health check

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::composer::{compose, NextStep};
use crate::core::generative::{build_prompt, generate_or_fallback, ResponseGenerator};
use crate::core::Analyzer;
use crate::types::{MedicalEntities, RiskLevel, SentimentResult, SymptomSummary};
use crate::HEALTH_TIPS_PER_REQUEST;

/// App state, immutable for the life of the server
pub struct AppState {
    pub analyzer: Analyzer,
    pub generator: Arc<dyn ResponseGenerator>,
}

/// Chat request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Accepted for client compatibility, not stored
    #[serde(default)]
    pub conversation_history: Vec<serde_json::Value>,
    pub current_step: Option<String>,
}

/// Analysis block of the chat response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnalysis {
    pub symptoms: Vec<SymptomSummary>,
    pub entities: MedicalEntities,
    pub sentiment: SentimentResult,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
}

/// Chat response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub analysis: ChatAnalysis,
    pub suggestions: Vec<String>,
    pub severity: RiskLevel,
    pub next_step: NextStep,
    pub follow_up_questions: Vec<String>,
}

/// Error body shared by all failing endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Analytics response
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub data: AnalyticsData,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsData {
    pub symptoms_database: usize,
    pub treatments_available: usize,
    pub nlp_features: Vec<&'static str>,
    pub supported_symptoms: Vec<String>,
}

/// Health tips response
#[derive(Debug, Serialize)]
pub struct HealthTipsResponse {
    pub success: bool,
    pub tips: Vec<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub services: HealthServices,
}

#[derive(Debug, Serialize)]
pub struct HealthServices {
    pub nlp: String,
    pub gemini_ai: String,
    pub database: String,
}

const NLP_FEATURES: [&str; 6] = [
    "Symptom keyword detection",
    "Medical entity extraction",
    "Sentiment analysis",
    "Risk assessment",
    "Emergency detection",
    "Follow-up question generation",
];

const CHAT_ERROR_RESPONSE: &str = "I apologize, but I encountered an error processing your request. Please try again or consult with a healthcare professional if this is urgent.";

/// Create the API router
pub fn create_router(analyzer: Analyzer, generator: Arc<dyn ResponseGenerator>) -> Router {
    let state = Arc::new(AppState { analyzer, generator });

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/analytics", get(analytics))
        .route("/api/health-tips", get(health_tips))
        .route("/api/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

/// Main chat endpoint.
/// The analysis is finished before the model is called, so a model
/// outage never hides the risk level.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Response {
    // Blank check only; the text is analyzed and prompted as sent
    let message = match req.message.as_deref() {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    success: false,
                    error: "Message is required".to_string(),
                    response: Some(CHAT_ERROR_RESPONSE.to_string()),
                    message: None,
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(
        history_len = req.conversation_history.len(),
        current_step = ?req.current_step,
        "Processing chat message"
    );

    let analysis = state.analyzer.analyze(&message);

    let prompt = build_prompt(&message, &analysis.symptoms);
    let model_text = generate_or_fallback(state.generator.as_ref(), &prompt).await;
    let composed = compose(&analysis, &model_text, req.current_step.as_deref());

    Json(ChatResponse {
        success: true,
        response: composed.response,
        severity: analysis.risk_level,
        next_step: composed.next_step,
        suggestions: analysis.suggestions,
        follow_up_questions: analysis.follow_up_questions,
        analysis: ChatAnalysis {
            symptoms: analysis.symptoms,
            entities: analysis.entities,
            sentiment: analysis.sentiment,
            risk_level: analysis.risk_level,
            risk_factors: analysis.risk_factors,
        },
    })
    .into_response()
}

/// Knowledge base summary
async fn analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsResponse> {
    let kb = state.analyzer.knowledge();
    Json(AnalyticsResponse {
        success: true,
        data: AnalyticsData {
            symptoms_database: kb.symptom_count(),
            treatments_available: kb.treatment_count(),
            nlp_features: NLP_FEATURES.to_vec(),
            supported_symptoms: kb.symptom_keys().into_iter().map(String::from).collect(),
        },
    })
}

/// Random distinct tips
async fn health_tips(State(state): State<Arc<AppState>>) -> Json<HealthTipsResponse> {
    let tips: Vec<String> = state
        .analyzer
        .knowledge()
        .health_tips()
        .choose_multiple(&mut rand::thread_rng(), HEALTH_TIPS_PER_REQUEST)
        .cloned()
        .collect();
    Json(HealthTipsResponse { success: true, tips })
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let gemini = if state.generator.is_configured() {
        "configured"
    } else {
        "not_configured"
    };
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: crate::VERSION.to_string(),
        services: HealthServices {
            nlp: "active".to_string(),
            gemini_ai: gemini.to_string(),
            database: "in_memory".to_string(),
        },
    })
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Endpoint not found".to_string(),
            response: None,
            message: Some("The requested endpoint does not exist.".to_string()),
        }),
    )
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    analyzer: Analyzer,
    generator: Arc<dyn ResponseGenerator>,
) -> Result<(), Box<dyn std::error::Error>> {
    let gemini_configured = generator.is_configured();
    let router = create_router(analyzer, generator);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, gemini_configured, "Carebot API listening");
    println!("🏥 Carebot API running on {}", addr);
    println!("  POST /api/chat        - Main chat interface");
    println!("  GET  /api/health-tips - Daily health tips");
    println!("  GET  /api/analytics   - System analytics");
    println!("  GET  /api/health      - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
