//! Core types for Carebot

mod severity;
mod symptom;
mod signals;
mod risk;
mod output;

pub use severity::{Severity, Urgency, RiskLevel};
pub use symptom::{SymptomDefinition, SymptomMatch, SymptomSummary};
pub use signals::{MedicalEntities, SentimentResult};
pub use risk::RiskAssessment;
pub use output::Analysis;
