//! Output structures for callers and terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{MedicalEntities, RiskLevel, SentimentResult, SymptomSummary};

/// Structured analysis of one user message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Ranked by confidence, ties in knowledge base order
    pub symptoms: Vec<SymptomSummary>,
    pub entities: MedicalEntities,
    pub sentiment: SentimentResult,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub risk_factors: Vec<String>,
    /// Distinct, first-encountered order, at most 5
    pub suggestions: Vec<String>,
    /// Distinct, first-encountered order, at most 3
    pub follow_up_questions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Analysis {
    pub fn has_symptoms(&self) -> bool {
        !self.symptoms.is_empty()
    }

    /// Symptom names in rank order
    pub fn symptom_names(&self) -> Vec<&str> {
        self.symptoms.iter().map(|s| s.name.as_str()).collect()
    }

    /// Single line for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let symptoms = if self.symptoms.is_empty() {
            "none".to_string()
        } else {
            self.symptoms
                .iter()
                .map(|s| format!("{}:{}%", s.name, s.confidence))
                .collect::<Vec<_>>()
                .join(",")
        };
        format!(
            "risk={} | score={} | symptoms={} | sentiment={:.2} | urgency={}",
            self.risk_level.as_str(),
            self.risk_score,
            symptoms,
            self.sentiment.score,
            self.sentiment.urgency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Severity, Urgency};

    fn sample() -> Analysis {
        Analysis {
            symptoms: vec![SymptomSummary {
                name: "headache".to_string(),
                confidence: 25,
                severity: Severity::Low,
            }],
            entities: MedicalEntities::default(),
            sentiment: SentimentResult { score: 0.0, urgency: Urgency::Low },
            risk_level: RiskLevel::Low,
            risk_score: 1,
            risk_factors: vec![],
            suggestions: vec![],
            follow_up_questions: vec![],
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_parseable_string() {
        let line = sample().to_parseable_string();
        assert!(line.contains("risk=low"));
        assert!(line.contains("score=1"));
        assert!(line.contains("headache:25%"));
    }

    #[test]
    fn test_camel_case_fields() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"riskLevel\":\"low\""));
        assert!(json.contains("\"followUpQuestions\""));
        assert!(json.contains("\"bodyParts\""));
    }
}
