//! Knowledge Base: symptom definitions, treatment table and word lexicons
//!
//! Loaded once from a JSON document and never mutated afterwards.
//! A default document is embedded at compile time.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SymptomDefinition;

/// Default knowledge document shipped with the binary
pub const EMBEDDED_KNOWLEDGE: &str = include_str!("../../data/knowledge.json");

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Knowledge document is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate symptom key: {0}")]
    DuplicateSymptom(String),

    #[error("Symptom '{0}' has no keywords")]
    NoKeywords(String),

    #[error("Symptom '{0}' has a blank keyword")]
    BlankKeyword(String),

    #[error("Treatments listed for unknown symptom: {0}")]
    UnknownTreatmentSymptom(String),
}

/// Fixed word lists used by the entity/sentiment analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub body_parts: Vec<String>,
    #[serde(default)]
    pub intensity_words: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub positive_words: Vec<String>,
    #[serde(default)]
    pub negative_words: Vec<String>,
    #[serde(default)]
    pub urgent_words: Vec<String>,
    #[serde(default)]
    pub emergency_keywords: Vec<String>,
}

impl Lexicon {
    fn normalize(&mut self) {
        for list in [
            &mut self.body_parts,
            &mut self.intensity_words,
            &mut self.medications,
            &mut self.positive_words,
            &mut self.negative_words,
            &mut self.urgent_words,
            &mut self.emergency_keywords,
        ] {
            normalize_terms(list);
        }
    }
}

/// On-disk shape of the knowledge document
#[derive(Debug, Deserialize)]
struct KnowledgeDocument {
    symptoms: Vec<SymptomDefinition>,
    #[serde(default)]
    treatments: HashMap<String, Vec<String>>,
    #[serde(default)]
    lexicon: Lexicon,
    #[serde(default)]
    health_tips: Vec<String>,
}

/// Immutable knowledge shared by every pipeline stage
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    /// Declaration order, used for tie-breaking
    symptoms: Vec<SymptomDefinition>,
    index: HashMap<String, usize>,
    treatments: HashMap<String, Vec<String>>,
    lexicon: Lexicon,
    health_tips: Vec<String>,
}

impl KnowledgeBase {
    /// Load the document embedded in the binary
    pub fn embedded() -> Result<Self, KnowledgeError> {
        Self::from_json(EMBEDDED_KNOWLEDGE)
    }

    /// Load a knowledge document from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading knowledge file");
        Self::from_json(&raw)
    }

    /// Parse and validate a knowledge document
    pub fn from_json(raw: &str) -> Result<Self, KnowledgeError> {
        let doc: KnowledgeDocument = serde_json::from_str(raw)?;
        Self::build(doc)
    }

    fn build(doc: KnowledgeDocument) -> Result<Self, KnowledgeError> {
        let mut symptoms = doc.symptoms;
        let mut index = HashMap::with_capacity(symptoms.len());

        for (pos, def) in symptoms.iter_mut().enumerate() {
            if def.keywords.is_empty() {
                return Err(KnowledgeError::NoKeywords(def.key.clone()));
            }
            if def.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(KnowledgeError::BlankKeyword(def.key.clone()));
            }
            for kw in def.keywords.iter_mut() {
                *kw = kw.to_lowercase();
            }
            if index.insert(def.key.clone(), pos).is_some() {
                return Err(KnowledgeError::DuplicateSymptom(def.key.clone()));
            }
        }

        // Sorted so the reported key does not depend on map iteration order
        let mut treatment_keys: Vec<&String> = doc.treatments.keys().collect();
        treatment_keys.sort();
        if let Some(unknown) = treatment_keys.into_iter().find(|k| !index.contains_key(*k)) {
            return Err(KnowledgeError::UnknownTreatmentSymptom(unknown.clone()));
        }

        let mut lexicon = doc.lexicon;
        lexicon.normalize();

        tracing::debug!(
            symptoms = symptoms.len(),
            treatments = doc.treatments.len(),
            "Knowledge base loaded"
        );

        Ok(Self {
            symptoms,
            index,
            treatments: doc.treatments,
            lexicon,
            health_tips: doc.health_tips,
        })
    }

    /// Symptom definitions in declaration order
    pub fn symptoms(&self) -> &[SymptomDefinition] {
        &self.symptoms
    }

    pub fn symptom(&self, key: &str) -> Option<&SymptomDefinition> {
        self.index.get(key).map(|&i| &self.symptoms[i])
    }

    /// Symptom keys in declaration order
    pub fn symptom_keys(&self) -> Vec<&str> {
        self.symptoms.iter().map(|s| s.key.as_str()).collect()
    }

    /// Treatment suggestions for a symptom, empty if none are listed
    pub fn treatments_for(&self, key: &str) -> &[String] {
        self.treatments.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }

    pub fn treatment_count(&self) -> usize {
        self.treatments.len()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn health_tips(&self) -> &[String] {
        &self.health_tips
    }
}

/// Lowercase and drop blanks and repeats, keeping first-seen order
fn normalize_terms(terms: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let normalized: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect();
    *terms = normalized;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_embedded_document_is_consistent() {
        let kb = KnowledgeBase::embedded().unwrap();
        assert_eq!(kb.symptom_count(), 6);
        assert_eq!(kb.treatment_count(), 4);
        for key in ["fever", "headache", "chest_pain", "cough"] {
            assert!(kb.symptom(key).is_some(), "treatment key {} must be a symptom", key);
            assert!(!kb.treatments_for(key).is_empty());
        }
    }

    #[test]
    fn test_declaration_order_kept() {
        let kb = KnowledgeBase::embedded().unwrap();
        assert_eq!(
            kb.symptom_keys(),
            vec!["fever", "chest_pain", "headache", "breathing_difficulty", "stomach_pain", "cough"]
        );
    }

    #[test]
    fn test_symptom_lookup() {
        let kb = KnowledgeBase::embedded().unwrap();
        let chest = kb.symptom("chest_pain").unwrap();
        assert_eq!(chest.severity, Severity::High);
        assert_eq!(chest.keywords.len(), 5);
        assert!(kb.symptom("sneezing").is_none());
        assert!(kb.treatments_for("stomach_pain").is_empty());
    }

    #[test]
    fn test_keywords_lowercased() {
        let kb = KnowledgeBase::from_json(
            r#"{"symptoms":[{"key":"rash","keywords":["Red Spots","ITCH"],"severity":"low"}]}"#,
        )
        .unwrap();
        assert_eq!(kb.symptom("rash").unwrap().keywords, vec!["red spots", "itch"]);
    }

    #[test]
    fn test_rejects_unknown_treatment_key() {
        let err = KnowledgeBase::from_json(
            r#"{"symptoms":[{"key":"rash","keywords":["itch"],"severity":"low"}],
                "treatments":{"sneezing":["Tissues"]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::UnknownTreatmentSymptom(k) if k == "sneezing"));
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let err = KnowledgeBase::from_json(
            r#"{"symptoms":[
                {"key":"rash","keywords":["itch"],"severity":"low"},
                {"key":"rash","keywords":["spots"],"severity":"medium"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::DuplicateSymptom(_)));
    }

    #[test]
    fn test_rejects_empty_keyword_list() {
        let err = KnowledgeBase::from_json(
            r#"{"symptoms":[{"key":"rash","keywords":[],"severity":"low"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::NoKeywords(_)));

        let err = KnowledgeBase::from_json(
            r#"{"symptoms":[{"key":"rash","keywords":["  "],"severity":"low"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::BlankKeyword(_)));
    }

    #[test]
    fn test_rejects_bad_severity() {
        let err = KnowledgeBase::from_json(
            r#"{"symptoms":[{"key":"rash","keywords":["itch"],"severity":"extreme"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::Parse(_)));
    }

    #[test]
    fn test_lexicon_normalized() {
        let kb = KnowledgeBase::from_json(
            r#"{"symptoms":[{"key":"rash","keywords":["itch"],"severity":"low"}],
                "lexicon":{"medications":["Aspirin","aspirin"," ","Advil"]}}"#,
        )
        .unwrap();
        assert_eq!(kb.lexicon().medications, vec!["aspirin", "advil"]);
        assert!(kb.lexicon().emergency_keywords.is_empty());
    }
}
