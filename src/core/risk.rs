//! Risk Assessor: emergency phrases + symptom severities → score and level
//!
//! Score contributions:
//! - any emergency phrase: +8 (once)
//! - HIGH symptom: +5
//! - MEDIUM symptom: +3
//! - LOW symptom: +1, with no factor string

use crate::core::EntityAnalyzer;
use crate::types::{RiskAssessment, RiskLevel, Severity, SymptomMatch};
use crate::{RISK_WEIGHT_EMERGENCY, RISK_WEIGHT_HIGH, RISK_WEIGHT_LOW, RISK_WEIGHT_MEDIUM};

/// Combines symptom matches and emergency phrases into one assessment
#[derive(Debug, Clone, Copy)]
pub struct RiskAssessor<'kb> {
    analyzer: EntityAnalyzer<'kb>,
}

impl<'kb> RiskAssessor<'kb> {
    pub fn new(analyzer: EntityAnalyzer<'kb>) -> Self {
        Self { analyzer }
    }

    /// Assess a message. Total: empty text and no symptoms give score 0.
    pub fn assess(&self, symptoms: &[SymptomMatch<'_>], raw_text: &str) -> RiskAssessment {
        let emergency = self.analyzer.detect_emergency_keywords(raw_text);
        score_risk(symptoms, &emergency)
    }
}

/// Score symptoms against an already detected emergency phrase list
pub fn score_risk(symptoms: &[SymptomMatch<'_>], emergency: &[String]) -> RiskAssessment {
    let mut score = 0;
    let mut factors = Vec::new();

    if !emergency.is_empty() {
        score += RISK_WEIGHT_EMERGENCY;
        factors.push(format!("Emergency indicators: {}", emergency.join(", ")));
    }

    for symptom in symptoms {
        match symptom.severity {
            Severity::High => {
                score += RISK_WEIGHT_HIGH;
                factors.push(format!("High severity: {}", symptom.name));
            }
            Severity::Medium => {
                score += RISK_WEIGHT_MEDIUM;
                factors.push(format!("Medium severity: {}", symptom.name));
            }
            Severity::Low => {
                score += RISK_WEIGHT_LOW;
            }
        }
    }

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        factors,
    }
}

// =============================================================================
// TESTS
// =============================================================================
