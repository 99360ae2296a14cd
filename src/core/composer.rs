//! Response Composer: final user-visible text from analysis + model text
//!
//! Emergency messages get a banner and no follow-up list; everything else
//! gets the numbered follow-up questions appended.

use serde::{Deserialize, Serialize};

use crate::types::{Analysis, RiskLevel};

pub const EMERGENCY_BANNER: &str = "🚨 EMERGENCY ALERT: Your symptoms suggest you need immediate medical attention. Please call emergency services or go to the nearest emergency room.";

pub const FOLLOW_UP_INTRO: &str = "To better assist you, could you please tell me:";

/// Conversation step name the client sends on its first message
pub const INITIAL_STEP: &str = "initial";

/// Where the conversation should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Continue,
    SymptomAnalysis,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedResponse {
    pub response: String,
    pub next_step: NextStep,
}

/// Build the final message and next step
pub fn compose(analysis: &Analysis, model_text: &str, current_step: Option<&str>) -> ComposedResponse {
    let emergency = analysis.risk_level == RiskLevel::Emergency;

    let mut response = if emergency {
        format!("{}\n\n{}", EMERGENCY_BANNER, model_text)
    } else {
        model_text.to_string()
    };

    if !emergency && !analysis.follow_up_questions.is_empty() {
        response.push_str("\n\n");
        response.push_str(FOLLOW_UP_INTRO);
        for (i, q) in analysis.follow_up_questions.iter().enumerate() {
            response.push_str(&format!("\n{}. {}", i + 1, q));
        }
    }

    let next_step = if emergency {
        NextStep::Emergency
    } else if analysis.has_symptoms() && current_step == Some(INITIAL_STEP) {
        NextStep::SymptomAnalysis
    } else {
        NextStep::Continue
    };

    ComposedResponse { response, next_step }
}

// =============================================================================
// TESTS
// =============================================================================
