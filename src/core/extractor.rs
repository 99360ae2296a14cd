//! Symptom Extractor: keyword containment against the knowledge base
//!
//! Confidence = matched keywords / total keywords for the symptom.
//! Each keyword counts once no matter how often it occurs.

use crate::core::KnowledgeBase;
use crate::types::SymptomMatch;

/// Extracts ranked symptom matches from free text
#[derive(Debug, Clone, Copy)]
pub struct SymptomExtractor<'kb> {
    kb: &'kb KnowledgeBase,
}

impl<'kb> SymptomExtractor<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Extract matches, highest confidence first.
    /// Equal confidences keep knowledge base declaration order.
    pub fn extract(&self, text: &str) -> Vec<SymptomMatch<'kb>> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let normalized = text.to_lowercase();
        let mut matches: Vec<SymptomMatch<'kb>> = self
            .kb
            .symptoms()
            .iter()
            .filter_map(|def| {
                let matched: Vec<&'kb str> = def
                    .keywords
                    .iter()
                    .filter(|kw| normalized.contains(kw.as_str()))
                    .map(String::as_str)
                    .collect();

                if matched.is_empty() {
                    return None;
                }

                Some(SymptomMatch {
                    name: def.key.as_str(),
                    confidence: matched.len() as f64 / def.keywords.len() as f64,
                    severity: def.severity,
                    matched_keywords: matched,
                    definition: def,
                })
            })
            .collect();

        // sort_by is stable, so ties stay in declaration order
        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        matches
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::embedded().unwrap()
    }

    #[test]
    fn test_empty_input() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        assert!(ex.extract("").is_empty());
        assert!(ex.extract("   \n\t").is_empty());
    }

    #[test]
    fn test_no_keywords() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        assert!(ex.extract("I would like to book an appointment").is_empty());
    }

    #[test]
    fn test_single_low_severity_match() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        let matches = ex.extract("I have a mild headache");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "headache");
        assert_eq!(matches[0].severity, Severity::Low);
        assert_eq!(matches[0].matched_keywords, vec!["headache"]);
        assert!((matches[0].confidence - 0.25).abs() < 1e-10);
        assert_eq!(matches[0].confidence_percent(), 25);
    }

    #[test]
    fn test_case_and_punctuation() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        let matches = ex.extract("FEVER!");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "fever");
    }

    #[test]
    fn test_all_keywords_gives_full_confidence() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        let matches = ex.extract("cough, coughing, hack, tussis");
        let cough = matches.iter().find(|m| m.name == "cough").unwrap();
        assert!((cough.confidence - 1.0).abs() < 1e-10);
        assert_eq!(matches[0].name, "cough");
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        let once = ex.extract("migraine");
        let thrice = ex.extract("migraine migraine migraine");
        assert_eq!(once[0].confidence, thrice[0].confidence);
    }

    #[test]
    fn test_multi_word_keyword_is_literal() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        // "chest" and "pain" apart do not form "chest pain"
        let matches = ex.extract("pain in my chest");
        assert!(matches.iter().all(|m| m.name != "chest_pain"));
        let matches = ex.extract("sudden chest pain");
        assert!(matches.iter().any(|m| m.name == "chest_pain"));
    }

    #[test]
    fn test_overlapping_keywords_match_independently() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        // "angina" belongs to chest_pain, "asthma" to breathing_difficulty
        let matches = ex.extract("my angina and asthma flared up");
        let names: Vec<&str> = matches.iter().map(|m| m.name).collect();
        assert!(names.contains(&"chest_pain"));
        assert!(names.contains(&"breathing_difficulty"));
    }

    #[test]
    fn test_ranking_and_tie_break() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        // fever: 2/6, headache: 1/4, cough: 1/4 (tie → declaration order)
        let matches = ex.extract("fever and chills, headache, cough");
        let names: Vec<&str> = matches.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["fever", "headache", "cough"]);
    }

    #[test]
    fn test_back_reference() {
        let kb = kb();
        let ex = SymptomExtractor::new(&kb);
        let matches = ex.extract("wheezing");
        assert_eq!(matches[0].definition.key, "breathing_difficulty");
        assert_eq!(matches[0].definition.questions.len(), 4);
    }
}
