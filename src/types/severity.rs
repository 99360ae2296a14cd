//! Severity, urgency and risk level definitions

use serde::{Deserialize, Serialize};

/// Static severity of a symptom definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency derived from sentiment words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// The four possible outcomes of a risk assessment, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Nothing concerning detected
    Low,
    /// Worth following up
    Moderate,
    /// Should see a professional soon
    Urgent,
    /// Needs immediate medical attention
    Emergency,
}

impl RiskLevel {
    /// Map an accumulated risk score onto a level
    pub fn from_score(score: u32) -> Self {
        if score >= crate::RISK_THRESHOLD_EMERGENCY {
            RiskLevel::Emergency
        } else if score >= crate::RISK_THRESHOLD_URGENT {
            RiskLevel::Urgent
        } else if score >= crate::RISK_THRESHOLD_MODERATE {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Urgent => "urgent",
            RiskLevel::Emergency => "emergency",
        }
    }

    /// Emoji for terminal display
    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Moderate => "🟡",
            RiskLevel::Urgent => "🟠",
            RiskLevel::Emergency => "🚨",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}
