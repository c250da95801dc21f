//! Rule-based risk scoring.
//!
//! Seven additive rules evaluated in a fixed order, clamped to 10.
//! Each rule is independent; the order only fixes how the breakdown
//! reads. Unrecorded vitals contribute nothing: a rule fires on a
//! measurement, never on the absence of one.

use crate::models::{AssessmentInput, PatientProfile, Vitals};

use super::catalog::{
    AGE_MIDLIFE_LIMIT, AGE_SENIOR_LIMIT, BMI_OBESE_LIMIT, BMI_OVERWEIGHT_LIMIT,
    BP_DIASTOLIC_LIMIT, BP_SYSTOLIC_LIMIT, CRITICAL_RISK_FACTORS, CRITICAL_RISK_FACTOR_POINTS,
    HIGH_RISK_SYMPTOMS, HIGH_RISK_SYMPTOM_POINTS, HR_HIGH_LIMIT, HR_LOW_LIMIT, SPO2_LOW_LIMIT,
};
use super::types::{Contribution, RiskScore};

/// Compute the bounded risk score for one assessment.
///
/// Deterministic and side-effect free; callers guarantee a resolved
/// profile before invoking.
pub fn compute_risk_score(profile: &PatientProfile, input: &AssessmentInput) -> RiskScore {
    let mut breakdown: Vec<Contribution> = Vec::new();
    let mut add = |label: String, points: u8| {
        breakdown.push(Contribution { label, points });
    };

    // 1. Age
    if profile.age > AGE_SENIOR_LIMIT {
        add(format!("Age over {AGE_SENIOR_LIMIT}"), 2);
    } else if profile.age > AGE_MIDLIFE_LIMIT {
        add(format!("Age over {AGE_MIDLIFE_LIMIT}"), 1);
    }

    // 2. BMI
    if profile.bmi() > BMI_OBESE_LIMIT {
        add(format!("BMI above {BMI_OBESE_LIMIT:.0} (obese range)"), 2);
    } else if profile.bmi() > BMI_OVERWEIGHT_LIMIT {
        add(
            format!("BMI above {BMI_OVERWEIGHT_LIMIT:.0} (overweight range)"),
            1,
        );
    }

    // 3. High-risk symptoms, catalog order; duplicates in the input count once
    for symptom in HIGH_RISK_SYMPTOMS {
        if input.has_symptom(symptom) {
            add(
                format!("{} (high-risk symptom)", symptom.label()),
                HIGH_RISK_SYMPTOM_POINTS,
            );
        }
    }

    // 4. Critical risk factors, catalog order
    for factor in CRITICAL_RISK_FACTORS {
        if input.has_risk_factor(factor) {
            add(
                format!("{} (critical risk factor)", factor.label()),
                CRITICAL_RISK_FACTOR_POINTS,
            );
        }
    }

    // 5. Blood pressure
    if bp_elevated(&input.vitals) {
        add(
            format!("Elevated blood pressure ({})", format_bp(&input.vitals)),
            2,
        );
    }

    // 6. Heart rate
    if let Some(hr) = input.vitals.heart_rate {
        if heart_rate_flag(hr) != HeartRateFlag::Normal {
            add(format!("Abnormal heart rate ({hr:.0} bpm)"), 1);
        }
    }

    // 7. Oxygen saturation
    if let Some(spo2) = input.vitals.spo2 {
        if spo2 < SPO2_LOW_LIMIT {
            add(format!("Low oxygen saturation ({spo2:.0}%)"), 3);
        }
    }

    let total: u32 = breakdown.iter().map(|c| u32::from(c.points)).sum();
    RiskScore {
        value: total.min(u32::from(RiskScore::MAX)) as u8,
        breakdown,
    }
}

/// The blood-pressure rule: systolic over 140 or diastolic over 90.
/// Shared with the vitals narrative so the ELEVATED flag and the score
/// can never disagree.
pub fn bp_elevated(vitals: &Vitals) -> bool {
    vitals.systolic_bp.is_some_and(|s| s > BP_SYSTOLIC_LIMIT)
        || vitals.diastolic_bp.is_some_and(|d| d > BP_DIASTOLIC_LIMIT)
}

/// Qualitative heart-rate flag for a recorded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartRateFlag {
    Tachycardia,
    Bradycardia,
    Normal,
}

impl HeartRateFlag {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tachycardia => "Tachycardia",
            Self::Bradycardia => "Bradycardia",
            Self::Normal => "Normal",
        }
    }
}

pub fn heart_rate_flag(heart_rate: f64) -> HeartRateFlag {
    if heart_rate > HR_HIGH_LIMIT {
        HeartRateFlag::Tachycardia
    } else if heart_rate < HR_LOW_LIMIT {
        HeartRateFlag::Bradycardia
    } else {
        HeartRateFlag::Normal
    }
}

/// "150/95 mmHg" with a `?` for a missing half, or "not recorded".
pub fn format_bp(vitals: &Vitals) -> String {
    match (vitals.systolic_bp, vitals.diastolic_bp) {
        (None, None) => "not recorded".to_string(),
        (sys, dia) => {
            let sys = sys.map_or("?".to_string(), |v| format!("{v:.0}"));
            let dia = dia.map_or("?".to_string(), |v| format!("{v:.0}"));
            format!("{sys}/{dia} mmHg")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{BloodGroup, Gender, RiskFactor, Symptom};
    use crate::models::{PatientDraft, Vitals};

    fn profile(age: u32, height_cm: f64, weight_kg: f64) -> PatientProfile {
        PatientProfile::from_draft(PatientDraft {
            first_name: "Test".into(),
            last_name: "Patient".into(),
            email: String::new(),
            phone: String::new(),
            date_of_birth: None,
            age,
            gender: Gender::Other,
            height_cm,
            weight_kg,
            blood_group: BloodGroup::OPositive,
            allergies: String::new(),
            medications: String::new(),
            medical_history: String::new(),
            insurance_provider: String::new(),
            policy_number: String::new(),
            emergency_contact_name: String::new(),
            emergency_contact_phone: String::new(),
        })
    }

    fn vitals(sys: f64, dia: f64, hr: f64, spo2: f64) -> Vitals {
        Vitals {
            systolic_bp: Some(sys),
            diastolic_bp: Some(dia),
            heart_rate: Some(hr),
            spo2: Some(spo2),
            temperature_f: None,
        }
    }

    /// Worked example: every rule fires, raw 16 clamps to 10.
    #[test]
    fn maximal_example_clamps_to_ten() {
        // age 70 -> +2; 95 kg at 172 cm is BMI 32.1 -> +2
        let profile = profile(70, 172.0, 95.0);
        let input = AssessmentInput {
            symptoms: vec![Symptom::ChestPain, Symptom::Palpitations],
            risk_factors: vec![RiskFactor::Diabetes, RiskFactor::Smoking],
            vitals: vitals(150.0, 95.0, 110.0, 92.0),
            ..Default::default()
        };

        let score = compute_risk_score(&profile, &input);
        assert_eq!(score.raw_total(), 16);
        assert_eq!(score.value, 10);
    }

    /// Healthy adult scores zero.
    #[test]
    fn healthy_adult_scores_zero() {
        // age 30, 63.6 kg at 170 cm is BMI 22.0
        let profile = profile(30, 170.0, 63.6);
        let input = AssessmentInput {
            vitals: vitals(118.0, 76.0, 70.0, 98.0),
            ..Default::default()
        };

        let score = compute_risk_score(&profile, &input);
        assert_eq!(score.value, 0);
        assert!(score.breakdown.is_empty());
    }

    /// Non-catalog symptoms and factors contribute nothing.
    #[test]
    fn non_catalog_entries_do_not_score() {
        // age 55 -> +1; 79.8 kg at 172 cm is BMI 27.0 -> +1
        let profile = profile(55, 172.0, 79.8);
        let input = AssessmentInput {
            symptoms: vec![Symptom::Fatigue],
            risk_factors: vec![RiskFactor::Stress],
            vitals: vitals(130.0, 85.0, 65.0, 97.0),
            ..Default::default()
        };

        let score = compute_risk_score(&profile, &input);
        assert_eq!(score.value, 2);
        assert_eq!(score.breakdown.len(), 2);
        assert!(score.breakdown[0].label.starts_with("Age over 50"));
        assert!(score.breakdown[1].label.starts_with("BMI above 25"));
    }

    #[test]
    fn duplicate_symptoms_count_once() {
        let profile = profile(30, 170.0, 63.6);
        let input = AssessmentInput {
            symptoms: vec![Symptom::ChestPain, Symptom::ChestPain, Symptom::ChestPain],
            ..Default::default()
        };

        let score = compute_risk_score(&profile, &input);
        assert_eq!(score.value, 2);
        assert_eq!(score.breakdown.len(), 1);
    }

    /// Unrecorded vitals never fire the abnormal-vitals rules.
    #[test]
    fn missing_vitals_contribute_zero() {
        let profile = profile(30, 170.0, 63.6);
        let input = AssessmentInput::default();

        let score = compute_risk_score(&profile, &input);
        assert_eq!(score.value, 0);
    }

    /// An explicit zero is a recorded measurement and scores as one.
    #[test]
    fn explicit_zero_vitals_still_score() {
        let profile = profile(30, 170.0, 63.6);
        let input = AssessmentInput {
            vitals: Vitals {
                heart_rate: Some(0.0),
                spo2: Some(0.0),
                ..Vitals::default()
            },
            ..Default::default()
        };

        let score = compute_risk_score(&profile, &input);
        // bradycardia +1, low SpO2 +3
        assert_eq!(score.value, 4);
    }

    /// Adding a risk factor never lowers the score.
    #[test]
    fn score_is_monotonic_in_risk_factors() {
        let profile = profile(55, 172.0, 79.8);
        let mut input = AssessmentInput {
            symptoms: vec![Symptom::ChestPain],
            vitals: vitals(150.0, 95.0, 110.0, 92.0),
            ..Default::default()
        };

        let mut previous = compute_risk_score(&profile, &input).value;
        for factor in CRITICAL_RISK_FACTORS {
            input.risk_factors.push(factor);
            let next = compute_risk_score(&profile, &input).value;
            assert!(next >= previous, "adding {:?} lowered the score", factor);
            previous = next;
        }
    }

    #[test]
    fn score_never_exceeds_max() {
        let profile = profile(80, 160.0, 120.0);
        let input = AssessmentInput {
            symptoms: HIGH_RISK_SYMPTOMS.to_vec(),
            risk_factors: CRITICAL_RISK_FACTORS.to_vec(),
            vitals: vitals(200.0, 120.0, 140.0, 80.0),
            ..Default::default()
        };

        let score = compute_risk_score(&profile, &input);
        assert_eq!(score.value, RiskScore::MAX);
        assert!(score.raw_total() > u32::from(RiskScore::MAX));
    }

    #[test]
    fn bp_rule_boundaries() {
        // Exactly at the limits does not fire
        assert!(!bp_elevated(&vitals(140.0, 90.0, 70.0, 98.0)));
        assert!(bp_elevated(&vitals(141.0, 80.0, 70.0, 98.0)));
        assert!(bp_elevated(&vitals(120.0, 91.0, 70.0, 98.0)));
        assert!(!bp_elevated(&Vitals::default()));
    }

    #[test]
    fn heart_rate_flags() {
        assert_eq!(heart_rate_flag(101.0), HeartRateFlag::Tachycardia);
        assert_eq!(heart_rate_flag(59.0), HeartRateFlag::Bradycardia);
        assert_eq!(heart_rate_flag(60.0), HeartRateFlag::Normal);
        assert_eq!(heart_rate_flag(100.0), HeartRateFlag::Normal);
    }

    #[test]
    fn format_bp_handles_partial_readings() {
        assert_eq!(format_bp(&vitals(150.0, 95.0, 0.0, 0.0)), "150/95 mmHg");
        let partial = Vitals {
            systolic_bp: Some(150.0),
            ..Vitals::default()
        };
        assert_eq!(format_bp(&partial), "150/? mmHg");
        assert_eq!(format_bp(&Vitals::default()), "not recorded");
    }
}
