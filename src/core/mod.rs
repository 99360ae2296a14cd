//! Core modules for Carebot

pub mod knowledge;
pub mod extractor;
pub mod entities;
pub mod risk;
pub mod follow_up;
pub mod analyzer;
pub mod composer;
pub mod generative;
pub mod api;

pub use knowledge::{KnowledgeBase, KnowledgeError, Lexicon};
pub use extractor::SymptomExtractor;
pub use entities::EntityAnalyzer;
pub use risk::{RiskAssessor, score_risk};
pub use follow_up::{select_follow_ups, suggest_treatments};
pub use analyzer::Analyzer;
pub use composer::{compose, ComposedResponse, NextStep};
pub use generative::{GeminiClient, GeminiConfig, GenerationError, ResponseGenerator, FALLBACK_RESPONSE};
pub use api::{create_router, run_server};
