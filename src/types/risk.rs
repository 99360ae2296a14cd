//! Risk assessment result

use serde::{Deserialize, Serialize};
use crate::types::RiskLevel;

/// Outcome of the risk assessor for one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Accumulated score, unbounded
    pub score: u32,
    pub level: RiskLevel,
    /// Human-readable reasons, in the order they were added
    pub factors: Vec<String>,
}

impl RiskAssessment {
    /// Zero-score assessment
    pub fn none() -> Self {
        Self {
            score: 0,
            level: RiskLevel::Low,
            factors: Vec::new(),
        }
    }
}
