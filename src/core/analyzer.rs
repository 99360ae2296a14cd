//! Analyzer: runs the full core pipeline for one message
//!
//! text → [SymptomExtractor, EntityAnalyzer] → RiskAssessor
//!      → follow-ups + treatment suggestions → Analysis

use std::sync::Arc;

use chrono::Utc;

use crate::core::follow_up::{select_follow_ups, suggest_treatments};
use crate::core::{EntityAnalyzer, KnowledgeBase, RiskAssessor, SymptomExtractor};
use crate::types::{Analysis, SymptomSummary};

/// Pipeline over a shared, immutable knowledge base.
/// Cheap to clone and safe to call from many requests at once.
#[derive(Debug, Clone)]
pub struct Analyzer {
    kb: Arc<KnowledgeBase>,
}

impl Analyzer {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Analyze one message. Never fails; empty text gives an empty analysis.
    pub fn analyze(&self, text: &str) -> Analysis {
        let kb = self.kb.as_ref();
        let entity_analyzer = EntityAnalyzer::new(kb.lexicon());

        let symptoms = SymptomExtractor::new(kb).extract(text);
        let entities = entity_analyzer.extract_entities(text);
        let sentiment = entity_analyzer.analyze_sentiment(text);
        let risk = RiskAssessor::new(entity_analyzer).assess(&symptoms, text);

        let follow_up_questions = select_follow_ups(&symptoms);
        let suggestions = suggest_treatments(kb, &symptoms);

        tracing::info!(
            symptoms = ?symptoms.iter().map(|s| s.name).collect::<Vec<_>>(),
            risk_level = risk.level.as_str(),
            risk_score = risk.score,
            "Message analyzed"
        );

        Analysis {
            symptoms: symptoms.iter().map(SymptomSummary::from).collect(),
            entities,
            sentiment,
            risk_level: risk.level,
            risk_score: risk.score,
            risk_factors: risk.factors,
            suggestions,
            follow_up_questions,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RiskLevel, Urgency};

    fn analyzer() -> Analyzer {
        Analyzer::new(Arc::new(KnowledgeBase::embedded().unwrap()))
    }

    #[test]
    fn test_empty_message() {
        let a = analyzer().analyze("");
        assert!(a.symptoms.is_empty());
        assert_eq!(a.sentiment.score, 0.0);
        assert_eq!(a.sentiment.urgency, Urgency::Low);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert_eq!(a.risk_score, 0);
        assert!(a.follow_up_questions.is_empty());
        assert!(a.suggestions.is_empty());
    }

    #[test]
    fn test_confidence_is_percentage() {
        let a = analyzer().analyze("fever and chills");
        assert_eq!(a.symptoms[0].name, "fever");
        // 2 of 6 keywords
        assert_eq!(a.symptoms[0].confidence, 33);
    }

    #[test]
    fn test_shared_across_threads() {
        let analyzer = analyzer();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let a = analyzer.clone();
                std::thread::spawn(move || a.analyze("chest pain").risk_level)
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), RiskLevel::Emergency);
        }
    }
}
