//! Symptom definitions and per-message matches

use serde::{Deserialize, Serialize};
use crate::types::Severity;

/// One entry of the knowledge base. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomDefinition {
    /// Unique symptom key, e.g. `fever`
    pub key: String,
    /// Keywords matched as literal lowercase substrings
    pub keywords: Vec<String>,
    pub severity: Severity,
    /// Informational only, never used for scoring
    #[serde(default)]
    pub possible_conditions: Vec<String>,
    /// Follow-up questions offered when this symptom matches
    #[serde(default)]
    pub questions: Vec<String>,
}

/// A symptom found in one message
#[derive(Debug, Clone, Serialize)]
pub struct SymptomMatch<'kb> {
    pub name: &'kb str,
    /// matched keywords / total keywords, 0.0-1.0
    pub confidence: f64,
    pub severity: Severity,
    pub matched_keywords: Vec<&'kb str>,
    #[serde(skip)]
    pub definition: &'kb SymptomDefinition,
}

impl<'kb> SymptomMatch<'kb> {
    /// Confidence as a whole percentage, rounded to nearest
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// Symptom as exposed to callers of the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSummary {
    pub name: String,
    /// Rounded percentage, 0-100
    pub confidence: u32,
    pub severity: Severity,
}

impl From<&SymptomMatch<'_>> for SymptomSummary {
    fn from(m: &SymptomMatch<'_>) -> Self {
        Self {
            name: m.name.to_string(),
            confidence: m.confidence_percent(),
            severity: m.severity,
        }
    }
}
