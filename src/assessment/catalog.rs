//! Declarative scoring and reference tables.
//!
//! Everything the engine treats as clinical "knowledge" lives here as
//! data: which symptoms and risk factors score, the vitals thresholds,
//! the symptom-to-condition table, and the diagnostic work-up list.
//! The scoring and narrative code only walks these tables.

use crate::models::enums::{RiskFactor, Symptom};

// ─── Rule thresholds ──────────────────────────────────────────────────────────

pub const AGE_SENIOR_LIMIT: u32 = 65;
pub const AGE_MIDLIFE_LIMIT: u32 = 50;

pub const BMI_OBESE_LIMIT: f64 = 30.0;
pub const BMI_OVERWEIGHT_LIMIT: f64 = 25.0;

pub const BP_SYSTOLIC_LIMIT: f64 = 140.0;
pub const BP_DIASTOLIC_LIMIT: f64 = 90.0;
pub const HR_HIGH_LIMIT: f64 = 100.0;
pub const HR_LOW_LIMIT: f64 = 60.0;
pub const SPO2_LOW_LIMIT: f64 = 95.0;

/// Fever flag in the vitals narrative only; temperature never scores.
pub const FEVER_LIMIT_F: f64 = 100.4;

// ─── Scored catalogs ──────────────────────────────────────────────────────────

pub const HIGH_RISK_SYMPTOM_POINTS: u8 = 2;

/// Symptoms that score, in the fixed evaluation order used for the
/// breakdown listing.
pub const HIGH_RISK_SYMPTOMS: [Symptom; 4] = [
    Symptom::ChestPain,
    Symptom::ShortnessOfBreath,
    Symptom::Palpitations,
    Symptom::Syncope,
];

pub const CRITICAL_RISK_FACTOR_POINTS: u8 = 1;

/// Risk factors that score, in fixed evaluation order.
pub const CRITICAL_RISK_FACTORS: [RiskFactor; 4] = [
    RiskFactor::Diabetes,
    RiskFactor::Hypertension,
    RiskFactor::FamilyHistoryHeartDisease,
    RiskFactor::Smoking,
];

// ─── Candidate conditions ─────────────────────────────────────────────────────

/// Symptom -> candidate cardiac conditions. Symptoms without an entry
/// contribute nothing to the conditions section.
pub const SYMPTOM_CONDITIONS: [(Symptom, &[&str]); 4] = [
    (
        Symptom::ChestPain,
        &[
            "Coronary Artery Disease",
            "Aortic Stenosis",
            "Hypertrophic Cardiomyopathy",
        ],
    ),
    (
        Symptom::ShortnessOfBreath,
        &[
            "Mitral Valve Disease",
            "Heart Failure",
            "Pulmonary Hypertension",
        ],
    ),
    (
        Symptom::Palpitations,
        &[
            "Atrial Fibrillation",
            "Supraventricular Tachycardia",
            "Premature Ventricular Contractions",
        ],
    ),
    (
        Symptom::Syncope,
        &[
            "Arrhythmia",
            "Orthostatic Hypotension",
            "Vasovagal Syncope",
        ],
    ),
];

pub fn conditions_for(symptom: Symptom) -> &'static [&'static str] {
    SYMPTOM_CONDITIONS
        .iter()
        .find(|(s, _)| *s == symptom)
        .map(|(_, conditions)| *conditions)
        .unwrap_or(&[])
}

// ─── Suggested diagnostics ────────────────────────────────────────────────────

/// Baseline cardiac work-up suggested on every report.
pub const BASE_DIAGNOSTICS: [&str; 7] = [
    "Resting 12-lead ECG",
    "Echocardiogram",
    "Lipid profile",
    "Fasting blood glucose and HbA1c",
    "Complete blood count",
    "Chest X-ray",
    "Thyroid function panel (TSH)",
];

/// Added when the urgency tier is URGENT.
pub const URGENT_DIAGNOSTIC: &str = "Cardiac troponin blood test";

/// Added when the score reaches `ELEVATED_SCORE_LIMIT`.
pub const ELEVATED_SCORE_DIAGNOSTIC: &str = "24-hour Holter monitoring";
pub const ELEVATED_SCORE_LIMIT: u8 = 5;
