//! Follow-up questions and treatment suggestions for matched symptoms

use std::collections::HashSet;

use crate::core::KnowledgeBase;
use crate::types::SymptomMatch;
use crate::{MAX_FOLLOW_UP_QUESTIONS, MAX_SUGGESTIONS};

/// Distinct follow-up questions in first-seen order, at most 3
pub fn select_follow_ups(symptoms: &[SymptomMatch<'_>]) -> Vec<String> {
    first_distinct(
        symptoms.iter().flat_map(|s| s.definition.questions.iter()),
        MAX_FOLLOW_UP_QUESTIONS,
    )
}

/// Distinct treatment suggestions in first-seen order, at most 5
pub fn suggest_treatments(kb: &KnowledgeBase, symptoms: &[SymptomMatch<'_>]) -> Vec<String> {
    first_distinct(
        symptoms.iter().flat_map(|s| kb.treatments_for(s.name).iter()),
        MAX_SUGGESTIONS,
    )
}

fn first_distinct<'a>(items: impl Iterator<Item = &'a String>, cap: usize) -> Vec<String> {
    let mut seen: HashSet<&'a String> = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .take(cap)
        .cloned()
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
