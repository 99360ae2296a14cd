//! Carebot: conversational health intake assistant
//!
//! Pipeline: text → symptom extractor + entity/sentiment analyzer
//! → risk assessor → follow-up selector → response composer

pub mod core;
pub mod types;

// =============================================================================
// RISK WEIGHTS [C]
// =============================================================================

/// Added once when any emergency phrase is present
pub const RISK_WEIGHT_EMERGENCY: u32 = 8;

/// Added per matched high-severity symptom
pub const RISK_WEIGHT_HIGH: u32 = 5;

/// Added per matched medium-severity symptom
pub const RISK_WEIGHT_MEDIUM: u32 = 3;

/// Added per matched low-severity symptom.
/// Low-severity matches never produce a risk factor string.
pub const RISK_WEIGHT_LOW: u32 = 1;

// =============================================================================
// RISK THRESHOLDS [C]
// =============================================================================

/// score >= 8 → EMERGENCY
pub const RISK_THRESHOLD_EMERGENCY: u32 = 8;

/// score >= 6 → URGENT
pub const RISK_THRESHOLD_URGENT: u32 = 6;

/// score >= 3 → MODERATE
pub const RISK_THRESHOLD_MODERATE: u32 = 3;

// =============================================================================
// SENTIMENT WEIGHTS [C]
// =============================================================================

pub const SENTIMENT_WEIGHT_POSITIVE: f64 = 0.1;
pub const SENTIMENT_WEIGHT_NEGATIVE: f64 = -0.2;
pub const SENTIMENT_WEIGHT_URGENT: f64 = -0.3;

/// Scores strictly below this are HIGH urgency even without an urgent word
pub const SENTIMENT_HIGH_URGENCY_BELOW: f64 = -0.3;

// =============================================================================
// OUTPUT CAPS [C]
// =============================================================================

/// Maximum follow-up questions returned per message
pub const MAX_FOLLOW_UP_QUESTIONS: usize = 3;

/// Maximum treatment suggestions returned per message
pub const MAX_SUGGESTIONS: usize = 5;

/// Number of tips served by the health-tips endpoint
pub const HEALTH_TIPS_PER_REQUEST: usize = 3;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
