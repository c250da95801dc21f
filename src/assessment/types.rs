use serde::Serialize;

use crate::models::{AssessmentInput, PatientProfile};

// ---------------------------------------------------------------------------
// RiskScore
// ---------------------------------------------------------------------------

/// One fired scoring rule: what it was and what it added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub label: String,
    pub points: u8,
}

/// Bounded risk score plus the itemized breakdown that produced it.
///
/// `value` is clamped to [0, MAX]; `breakdown` lists every nonzero
/// contribution in fixed rule order, so the narrative (and any audit)
/// can reproduce the sum.
#[derive(Debug, Clone, Serialize)]
pub struct RiskScore {
    pub value: u8,
    pub breakdown: Vec<Contribution>,
}

impl RiskScore {
    pub const MAX: u8 = 10;

    /// Unclamped sum of all contributions.
    pub fn raw_total(&self) -> u32 {
        self.breakdown.iter().map(|c| u32::from(c.points)).sum()
    }
}

// ---------------------------------------------------------------------------
// UrgencyTier
// ---------------------------------------------------------------------------

/// Urgency classification derived from the score alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UrgencyTier {
    Low,
    Moderate,
    Urgent,
}

impl UrgencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::Urgent => "URGENT",
        }
    }

    /// Fixed reasoning sentence shown with the tier.
    pub fn reasoning(&self) -> &'static str {
        match self {
            Self::Urgent => {
                "High-risk symptoms and factors present; immediate specialist consultation recommended."
            }
            Self::Moderate => {
                "Several risk factors identified; consultation within 2–4 weeks recommended."
            }
            Self::Low => "Routine follow-up recommended.",
        }
    }

    /// Tier-specific action sentence.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Urgent => "Contact a cardiologist or emergency services within 24 hours.",
            Self::Moderate => "Schedule a cardiology consultation within the next 2–4 weeks.",
            Self::Low => "Continue healthy habits and book an annual cardiac screening.",
        }
    }
}

impl serde::Serialize for UrgencyTier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The narrative sections of a report, each independently computed.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSections {
    pub patient_summary: String,
    pub risk_breakdown: String,
    pub vitals_interpretation: String,
    pub urgency: String,
    pub suggested_diagnostics: Vec<String>,
    pub possible_conditions: Vec<String>,
    pub doctor_script: String,
    pub clinician_summary: String,
    pub disclaimer: String,
}

/// Immutable assessment report. Regenerating produces a new report with
/// a new id and timestamp; nothing here is ever edited in place.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Display-only identifier, derived from the generation timestamp.
    pub id: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    pub patient: PatientProfile,
    pub input: AssessmentInput,
    pub score: RiskScore,
    pub tier: UrgencyTier,
    pub sections: ReportSections,
}
