//! Entity/Sentiment Analyzer: lexicon containment over the raw message
//!
//! Every lexicon term contributes at most once, however often it occurs.
//! Time expressions use a single regex for relative phrases; there is no
//! calendar date parsing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::knowledge::Lexicon;
use crate::types::{MedicalEntities, SentimentResult, Urgency};
use crate::{
    SENTIMENT_HIGH_URGENCY_BELOW, SENTIMENT_WEIGHT_NEGATIVE, SENTIMENT_WEIGHT_POSITIVE,
    SENTIMENT_WEIGHT_URGENT,
};

lazy_static! {
    // =========================================================================
    // Relative time phrases: "yesterday", "since monday", "for 3 days",
    // "two weeks ago", "last night", "this morning"
    // =========================================================================
    static ref RE_TIME_EXPRESSION: Regex = Regex::new(
        r"(?i)\b(yesterday|today|tonight|this (?:morning|afternoon|evening|week|month)|last (?:night|week|month|year|weekend)|since (?:yesterday|today|this morning|last (?:night|week|month)|(?:mon|tues|wednes|thurs|fri|satur|sun)day|morning|breakfast|lunch|dinner)|for (?:a|an|one|two|three|four|five|six|seven|several|a few|\d+) (?:minutes?|hours?|days?|weeks?|months?|years?)|(?:a|an|one|two|three|four|five|six|seven|several|a few|\d+) (?:minutes?|hours?|days?|weeks?|months?|years?) ago)\b"
    ).unwrap();
}

/// Scans a message against the fixed lexicons
#[derive(Debug, Clone, Copy)]
pub struct EntityAnalyzer<'kb> {
    lexicon: &'kb Lexicon,
}

impl<'kb> EntityAnalyzer<'kb> {
    pub fn new(lexicon: &'kb Lexicon) -> Self {
        Self { lexicon }
    }

    /// Body parts, intensity words, medications and time phrases
    pub fn extract_entities(&self, text: &str) -> MedicalEntities {
        let normalized = text.to_lowercase();
        MedicalEntities {
            body_parts: contained(&self.lexicon.body_parts, &normalized),
            time_expressions: time_expressions(&normalized),
            intensity_words: contained(&self.lexicon.intensity_words, &normalized),
            medications: contained(&self.lexicon.medications, &normalized),
        }
    }

    /// Score sentiment and derive urgency
    pub fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        let normalized = text.to_lowercase();
        if normalized.trim().is_empty() {
            return SentimentResult::neutral();
        }

        let positive = count_contained(&self.lexicon.positive_words, &normalized);
        let negative = count_contained(&self.lexicon.negative_words, &normalized);
        let urgent = count_contained(&self.lexicon.urgent_words, &normalized);

        // One addition per matched word, positives then negatives then urgent.
        // Multiplying counts rounds differently at the -0.3 edge.
        let mut score = 0.0;
        for _ in 0..positive {
            score += SENTIMENT_WEIGHT_POSITIVE;
        }
        for _ in 0..negative {
            score += SENTIMENT_WEIGHT_NEGATIVE;
        }
        for _ in 0..urgent {
            score += SENTIMENT_WEIGHT_URGENT;
        }

        let urgency = if urgent > 0 || score < SENTIMENT_HIGH_URGENCY_BELOW {
            Urgency::High
        } else if score < 0.0 {
            Urgency::Medium
        } else {
            Urgency::Low
        };

        SentimentResult { score, urgency }
    }

    /// Emergency phrases present in the message, in lexicon order
    pub fn detect_emergency_keywords(&self, text: &str) -> Vec<String> {
        contained(&self.lexicon.emergency_keywords, &text.to_lowercase())
    }
}

/// Terms (already lowercase) contained in the normalized text
fn contained(terms: &[String], normalized: &str) -> Vec<String> {
    terms
        .iter()
        .filter(|t| normalized.contains(t.as_str()))
        .cloned()
        .collect()
}

fn count_contained(terms: &[String], normalized: &str) -> usize {
    terms.iter().filter(|t| normalized.contains(t.as_str())).count()
}

/// Relative time phrases in text order, without repeats
fn time_expressions(normalized: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in RE_TIME_EXPRESSION.find_iter(normalized) {
        let phrase = m.as_str().to_string();
        if !found.contains(&phrase) {
            found.push(phrase);
        }
    }
    found
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KnowledgeBase;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::embedded().unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_input() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        let s = an.analyze_sentiment("");
        assert_eq!(s.score, 0.0);
        assert_eq!(s.urgency, Urgency::Low);
        assert!(an.extract_entities("").is_empty());
        assert!(an.detect_emergency_keywords("").is_empty());
    }

    #[test]
    fn test_entities() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        let e = an.extract_entities("Sharp pain in my Chest and left arm, took Advil and aspirin");
        assert_eq!(e.body_parts, vec!["chest", "arm"]);
        assert_eq!(e.intensity_words, vec!["sharp"]);
        assert_eq!(e.medications, vec!["aspirin", "advil"]);
    }

    #[test]
    fn test_entities_substring_semantics() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        // "headache" contains "head"; "heartburn" contains "heart"
        let e = an.extract_entities("headache and heartburn");
        assert_eq!(e.body_parts, vec!["head", "heart"]);
    }

    #[test]
    fn test_time_expressions() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        let e = an.extract_entities("Started yesterday, worse since Monday, coughing for 3 days");
        assert_eq!(e.time_expressions, vec!["yesterday", "since monday", "for 3 days"]);

        let e = an.extract_entities("It began two weeks ago and again last night");
        assert_eq!(e.time_expressions, vec!["two weeks ago", "last night"]);
    }

    #[test]
    fn test_positive_sentiment() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        let s = an.analyze_sentiment("I feel better and comfortable");
        assert!(approx(s.score, 0.2), "got {}", s.score);
        assert_eq!(s.urgency, Urgency::Low);
    }

    #[test]
    fn test_negative_sentiment_medium() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        let s = an.analyze_sentiment("I feel sick");
        assert!(approx(s.score, -0.2));
        assert_eq!(s.urgency, Urgency::Medium);
    }

    #[test]
    fn test_negative_sentiment_high_without_urgent_word() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        // pain + terrible = -0.4 < -0.3
        let s = an.analyze_sentiment("terrible pain");
        assert!(approx(s.score, -0.4));
        assert_eq!(s.urgency, Urgency::High);
    }

    #[test]
    fn test_score_of_exactly_minus_point_three_is_medium() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        // 3 positive (better, fine, good) and 3 negative (bad, awful, sick)
        let s = an.analyze_sentiment("better fine good but bad awful sick");
        assert_eq!(s.score, -0.3);
        assert_eq!(s.urgency, Urgency::Medium);
    }

    #[test]
    fn test_mixed_words_summing_to_zero_is_low() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        // better + good - sick
        let s = an.analyze_sentiment("better and good but sick");
        assert_eq!(s.score, 0.0);
        assert_eq!(s.urgency, Urgency::Low);
    }

    #[test]
    fn test_urgent_word_forces_high() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        // better +0.1, good +0.1, emergency -0.3
        let s = an.analyze_sentiment("good news, better now, but was an emergency");
        assert!(approx(s.score, -0.1));
        assert_eq!(s.urgency, Urgency::High);
    }

    #[test]
    fn test_word_counts_once() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        let once = an.analyze_sentiment("sick");
        let many = an.analyze_sentiment("sick sick sick");
        assert_eq!(once, many);
    }

    #[test]
    fn test_emergency_keywords() {
        let kb = kb();
        let an = EntityAnalyzer::new(kb.lexicon());
        let found = an.detect_emergency_keywords("Crushing pain, I CAN'T BREATHE and chest pain");
        assert_eq!(found, vec!["chest pain", "can't breathe", "crushing pain"]);
        assert!(an.detect_emergency_keywords("mild cough").is_empty());
    }
}
