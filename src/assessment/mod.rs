//! Risk Assessment Engine.
//!
//! Pure, synchronous, stateless: a profile and an assessment snapshot go
//! in, a bounded score, an urgency tier, and an immutable report come
//! out. Callers must resolve a patient profile first; the engine never
//! reaches for ambient state and performs no I/O.

pub mod catalog;
pub mod report;
pub mod scoring;
pub mod triage;
pub mod types;

pub use report::{synthesize, DISCLAIMER};
pub use scoring::compute_risk_score;
pub use triage::classify;
pub use types::{Contribution, Report, RiskScore, UrgencyTier};

use crate::models::{AssessmentInput, PatientProfile};

/// Score, classify, and synthesize in one step.
pub fn generate_report(profile: &PatientProfile, input: &AssessmentInput) -> Report {
    let score = compute_risk_score(profile, input);
    let tier = classify(score.value);
    synthesize(profile, input, &score, tier)
}
