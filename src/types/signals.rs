//! Entity and sentiment structures for the analyzer

use serde::{Deserialize, Serialize};
use crate::types::Urgency;

/// Terms found in one message, each list in lexicon order without repeats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalEntities {
    pub body_parts: Vec<String>,
    /// Relative time phrases, in text order (regex based)
    pub time_expressions: Vec<String>,
    pub intensity_words: Vec<String>,
    pub medications: Vec<String>,
}

impl MedicalEntities {
    pub fn is_empty(&self) -> bool {
        self.body_parts.is_empty()
            && self.time_expressions.is_empty()
            && self.intensity_words.is_empty()
            && self.medications.is_empty()
    }
}

/// Sentiment score with derived urgency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Sum of word weights, not clamped
    pub score: f64,
    pub urgency: Urgency,
}

impl SentimentResult {
    /// Neutral result for empty input
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            urgency: Urgency::Low,
        }
    }
}
