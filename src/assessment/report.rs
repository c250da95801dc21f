//! Report synthesis.
//!
//! Every narrative section is its own pure function over the structured
//! inputs, so sections can be tested in isolation and alternate output
//! formats (JSON, text, PDF) all render from one canonical structure.

use chrono::Utc;

use crate::models::enums::Symptom;
use crate::models::{AssessmentInput, PatientProfile, Vitals};

use super::catalog::{
    BASE_DIAGNOSTICS, ELEVATED_SCORE_DIAGNOSTIC, ELEVATED_SCORE_LIMIT, FEVER_LIMIT_F,
    SPO2_LOW_LIMIT, SYMPTOM_CONDITIONS, URGENT_DIAGNOSTIC,
};
use super::scoring::{bp_elevated, format_bp, heart_rate_flag};
use super::types::{Report, ReportSections, RiskScore, UrgencyTier};

/// Fixed disclaimer, present on every report without exception.
pub const DISCLAIMER: &str = "This automated assessment is for informational purposes only and \
does not constitute a medical diagnosis. Always consult a qualified healthcare professional \
about any symptoms or concerns. If you believe you are experiencing a medical emergency, call \
your local emergency number immediately.";

/// Build an immutable report from the assessment inputs and the computed
/// score. Each invocation produces a fresh id and timestamp.
pub fn synthesize(
    profile: &PatientProfile,
    input: &AssessmentInput,
    score: &RiskScore,
    tier: UrgencyTier,
) -> Report {
    let now = Utc::now();

    Report {
        id: format!("RPT-{}", now.format("%Y%m%d%H%M%S%3f")),
        generated_at: now.to_rfc3339(),
        patient: profile.clone(),
        input: input.clone(),
        score: score.clone(),
        tier,
        sections: ReportSections {
            patient_summary: patient_summary(profile),
            risk_breakdown: risk_breakdown(score),
            vitals_interpretation: vitals_interpretation(&input.vitals),
            urgency: urgency_statement(tier),
            suggested_diagnostics: suggested_diagnostics(score.value, tier),
            possible_conditions: possible_conditions(&input.symptoms),
            doctor_script: doctor_script(input, score.value),
            clinician_summary: clinician_summary(profile, input, score.value, tier),
            disclaimer: DISCLAIMER.to_string(),
        },
    }
}

/// Demographics, physicals and coverage. Blank contact fields are
/// skipped rather than rendered empty.
pub fn patient_summary(profile: &PatientProfile) -> String {
    let mut s = String::new();
    s.push_str(&format!("Name: {}\n", profile.full_name()));
    s.push_str(&format!(
        "Age: {} ({})    Gender: {}\n",
        profile.age,
        profile.age_bracket().label(),
        profile.gender.label()
    ));
    s.push_str(&format!(
        "Height: {:.1} cm    Weight: {:.1} kg    BMI: {:.1} ({})\n",
        profile.height_cm(),
        profile.weight_kg(),
        profile.bmi(),
        profile.bmi_category().label()
    ));
    s.push_str(&format!("Blood type: {}\n", profile.blood_group.as_str()));

    let contact: Vec<&str> = [profile.email.as_str(), profile.phone.as_str()]
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect();
    if !contact.is_empty() {
        s.push_str(&format!("Contact: {}\n", contact.join(" / ")));
    }
    if !profile.insurance_provider.trim().is_empty() {
        if profile.policy_number.trim().is_empty() {
            s.push_str(&format!("Insurance: {}\n", profile.insurance_provider));
        } else {
            s.push_str(&format!(
                "Insurance: {}, policy {}\n",
                profile.insurance_provider, profile.policy_number
            ));
        }
    }
    if !profile.emergency_contact_name.trim().is_empty() {
        if profile.emergency_contact_phone.trim().is_empty() {
            s.push_str(&format!(
                "Emergency contact: {}\n",
                profile.emergency_contact_name
            ));
        } else {
            s.push_str(&format!(
                "Emergency contact: {} ({})\n",
                profile.emergency_contact_name, profile.emergency_contact_phone
            ));
        }
    }

    s.trim_end().to_string()
}

/// Score out of 10 plus the itemized contributions; only fired rules
/// appear.
pub fn risk_breakdown(score: &RiskScore) -> String {
    let mut s = format!("Overall risk score: {}/{}\n", score.value, RiskScore::MAX);
    if score.breakdown.is_empty() {
        s.push_str("No contributing risk factors were identified.");
        return s;
    }
    for item in &score.breakdown {
        s.push_str(&format!("  +{}  {}\n", item.points, item.label));
    }
    s.trim_end().to_string()
}

/// Each vital with a qualitative flag. The BP flag reuses the scoring
/// predicate so the narrative can never contradict the score.
pub fn vitals_interpretation(vitals: &Vitals) -> String {
    let mut lines = Vec::with_capacity(4);

    if vitals.systolic_bp.is_none() && vitals.diastolic_bp.is_none() {
        lines.push("Blood pressure: not recorded".to_string());
    } else {
        let flag = if bp_elevated(vitals) {
            "ELEVATED"
        } else {
            "Normal range"
        };
        lines.push(format!("Blood pressure: {} ({})", format_bp(vitals), flag));
    }

    match vitals.heart_rate {
        Some(hr) => lines.push(format!(
            "Heart rate: {hr:.0} bpm ({})",
            heart_rate_flag(hr).label()
        )),
        None => lines.push("Heart rate: not recorded".to_string()),
    }

    match vitals.spo2 {
        Some(spo2) => {
            let flag = if spo2 < SPO2_LOW_LIMIT { "LOW" } else { "Normal" };
            lines.push(format!("Oxygen saturation: {spo2:.0}% ({flag})"));
        }
        None => lines.push("Oxygen saturation: not recorded".to_string()),
    }

    match vitals.temperature_f {
        Some(temp) => {
            let flag = if temp > FEVER_LIMIT_F { "Fever" } else { "Normal" };
            lines.push(format!("Temperature: {temp:.1} °F ({flag})"));
        }
        None => lines.push("Temperature: not recorded".to_string()),
    }

    lines.join("\n")
}

pub fn urgency_statement(tier: UrgencyTier) -> String {
    format!(
        "Urgency level: {}. {} {}",
        tier.label(),
        tier.reasoning(),
        tier.action()
    )
}

/// Seven baseline tests, plus troponin for URGENT and a Holter once the
/// score reaches the elevated limit.
pub fn suggested_diagnostics(score_value: u8, tier: UrgencyTier) -> Vec<String> {
    let mut tests: Vec<String> = BASE_DIAGNOSTICS.iter().map(|t| t.to_string()).collect();
    if tier == UrgencyTier::Urgent {
        tests.push(URGENT_DIAGNOSTIC.to_string());
    }
    if score_value >= ELEVATED_SCORE_LIMIT {
        tests.push(ELEVATED_SCORE_DIAGNOSTIC.to_string());
    }
    tests
}

/// Union of the condition table entries for every reported symptom that
/// has one, in table order, deduplicated.
pub fn possible_conditions(symptoms: &[Symptom]) -> Vec<String> {
    let mut conditions: Vec<String> = Vec::new();
    for (symptom, mapped) in SYMPTOM_CONDITIONS {
        if symptoms.contains(&symptom) {
            for condition in mapped {
                if !conditions.iter().any(|c| c == condition) {
                    conditions.push(condition.to_string());
                }
            }
        }
    }
    conditions
}

/// First-person script the patient can read to their doctor.
pub fn doctor_script(input: &AssessmentInput, score_value: u8) -> String {
    let symptoms = if input.symptoms.is_empty() {
        "no specific symptoms from the checklist".to_string()
    } else {
        input
            .symptoms
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let factors = if input.risk_factors.is_empty() {
        "none that I know of".to_string()
    } else {
        input
            .risk_factors
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut s = format!(
        "Doctor, I have been experiencing: {symptoms}. My known risk factors are: {factors}."
    );
    if !input.additional_symptoms.trim().is_empty() {
        s.push_str(&format!(
            " Other symptoms I have noticed: {}.",
            input.additional_symptoms.trim()
        ));
    }
    if !input.family_history.trim().is_empty() {
        s.push_str(&format!(
            " Relevant family history: {}.",
            input.family_history.trim()
        ));
    }
    s.push_str(&format!(
        " My cardiac risk assessment scored {score_value} out of 10; I would like your evaluation \
         and advice on next steps."
    ));
    s
}

/// One-line structured recap for professional handoff.
pub fn clinician_summary(
    profile: &PatientProfile,
    input: &AssessmentInput,
    score_value: u8,
    tier: UrgencyTier,
) -> String {
    let sx = if input.symptoms.is_empty() {
        "none".to_string()
    } else {
        input
            .symptoms
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let rf = if input.risk_factors.is_empty() {
        "none".to_string()
    } else {
        input
            .risk_factors
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let hr = input
        .vitals
        .heart_rate
        .map_or("n/r".to_string(), |v| format!("{v:.0} bpm"));
    let spo2 = input
        .vitals
        .spo2
        .map_or("n/r".to_string(), |v| format!("{v:.0}%"));
    let temp = input
        .vitals
        .temperature_f
        .map_or("n/r".to_string(), |v| format!("{v:.1}F"));

    format!(
        "PT {}, {} | {}y {} | BMI {:.1} | BP {} | HR {} | SpO2 {} | Temp {} | Sx: {} | RF: {} | Score {}/{} | {}",
        profile.last_name,
        profile.first_name,
        profile.age,
        profile.gender.as_str(),
        profile.bmi(),
        format_bp(&input.vitals),
        hr,
        spo2,
        temp,
        sx,
        rf,
        score_value,
        RiskScore::MAX,
        tier.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::scoring::compute_risk_score;
    use crate::assessment::triage::classify;
    use crate::assessment::types::Contribution;
    use crate::models::enums::{BloodGroup, Gender, RiskFactor};
    use crate::models::PatientDraft;

    fn profile() -> PatientProfile {
        PatientProfile::from_draft(PatientDraft {
            first_name: "Amara".into(),
            last_name: "Diallo".into(),
            email: "amara@example.com".into(),
            phone: "+1 (555) 414-2200".into(),
            date_of_birth: None,
            age: 70,
            gender: Gender::Female,
            height_cm: 172.0,
            weight_kg: 95.0,
            blood_group: BloodGroup::BPositive,
            allergies: "none".into(),
            medications: "metoprolol".into(),
            medical_history: "hypertension since 2015".into(),
            insurance_provider: "Acme Health".into(),
            policy_number: "POL-44".into(),
            emergency_contact_name: "K. Diallo".into(),
            emergency_contact_phone: "+1 (555) 000-9999".into(),
        })
    }

    fn input() -> AssessmentInput {
        AssessmentInput {
            symptoms: vec![Symptom::ChestPain, Symptom::Palpitations],
            risk_factors: vec![RiskFactor::Diabetes, RiskFactor::Smoking],
            vitals: Vitals {
                systolic_bp: Some(150.0),
                diastolic_bp: Some(95.0),
                heart_rate: Some(110.0),
                spo2: Some(92.0),
                temperature_f: Some(98.6),
            },
            additional_symptoms: "night sweats".into(),
            family_history: "father had a bypass at 60".into(),
        }
    }

    fn report() -> Report {
        let profile = profile();
        let input = input();
        let score = compute_risk_score(&profile, &input);
        let tier = classify(score.value);
        synthesize(&profile, &input, &score, tier)
    }

    #[test]
    fn patient_summary_includes_bracket_and_bmi_category() {
        let summary = patient_summary(&profile());
        assert!(summary.contains("Amara Diallo"));
        assert!(summary.contains("(senior)"));
        assert!(summary.contains("(Obese)"));
        assert!(summary.contains("Insurance: Acme Health, policy POL-44"));
    }

    #[test]
    fn patient_summary_skips_blank_fields() {
        let mut p = profile();
        p.insurance_provider = String::new();
        p.email = String::new();
        p.phone = String::new();
        let summary = patient_summary(&p);
        assert!(!summary.contains("Insurance:"));
        assert!(!summary.contains("Contact:"));
    }

    #[test]
    fn risk_breakdown_lists_only_fired_rules() {
        let score = RiskScore {
            value: 3,
            breakdown: vec![
                Contribution {
                    label: "Age over 65".into(),
                    points: 2,
                },
                Contribution {
                    label: "Diabetes (critical risk factor)".into(),
                    points: 1,
                },
            ],
        };
        let text = risk_breakdown(&score);
        assert!(text.starts_with("Overall risk score: 3/10"));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("+2  Age over 65"));
    }

    #[test]
    fn risk_breakdown_for_zero_score() {
        let score = RiskScore {
            value: 0,
            breakdown: vec![],
        };
        let text = risk_breakdown(&score);
        assert!(text.contains("No contributing risk factors were identified."));
    }

    #[test]
    fn vitals_interpretation_flags_abnormal_values() {
        let text = vitals_interpretation(&input().vitals);
        assert!(text.contains("Blood pressure: 150/95 mmHg (ELEVATED)"));
        assert!(text.contains("Heart rate: 110 bpm (Tachycardia)"));
        assert!(text.contains("Oxygen saturation: 92% (LOW)"));
        assert!(text.contains("Temperature: 98.6 °F (Normal)"));
    }

    #[test]
    fn vitals_interpretation_marks_missing_as_not_recorded() {
        let text = vitals_interpretation(&Vitals::default());
        assert_eq!(
            text.lines()
                .filter(|l| l.ends_with("not recorded"))
                .count(),
            4
        );
    }

    #[test]
    fn vitals_interpretation_normal_ranges() {
        let vitals = Vitals {
            systolic_bp: Some(118.0),
            diastolic_bp: Some(76.0),
            heart_rate: Some(70.0),
            spo2: Some(98.0),
            temperature_f: Some(101.0),
        };
        let text = vitals_interpretation(&vitals);
        assert!(text.contains("Blood pressure: 118/76 mmHg (Normal range)"));
        assert!(text.contains("Heart rate: 70 bpm (Normal)"));
        assert!(text.contains("Oxygen saturation: 98% (Normal)"));
        assert!(text.contains("Temperature: 101.0 °F (Fever)"));
    }

    #[test]
    fn diagnostics_grow_with_severity() {
        assert_eq!(suggested_diagnostics(2, UrgencyTier::Low).len(), 7);

        let moderate = suggested_diagnostics(5, UrgencyTier::Moderate);
        assert_eq!(moderate.len(), 8);
        assert_eq!(moderate.last().unwrap(), ELEVATED_SCORE_DIAGNOSTIC);

        let urgent = suggested_diagnostics(9, UrgencyTier::Urgent);
        assert_eq!(urgent.len(), 9);
        assert!(urgent.contains(&URGENT_DIAGNOSTIC.to_string()));
        assert!(urgent.contains(&ELEVATED_SCORE_DIAGNOSTIC.to_string()));
    }

    #[test]
    fn conditions_for_shortness_of_breath_are_exact() {
        let conditions = possible_conditions(&[Symptom::ShortnessOfBreath]);
        assert_eq!(
            conditions,
            vec![
                "Mitral Valve Disease",
                "Heart Failure",
                "Pulmonary Hypertension"
            ]
        );
    }

    #[test]
    fn conditions_union_is_deduplicated() {
        let twice = possible_conditions(&[Symptom::ChestPain, Symptom::ChestPain]);
        let once = possible_conditions(&[Symptom::ChestPain]);
        assert_eq!(twice, once);
    }

    #[test]
    fn unmapped_symptoms_add_no_conditions() {
        assert!(possible_conditions(&[Symptom::Fatigue, Symptom::Nausea]).is_empty());
    }

    #[test]
    fn doctor_script_echoes_inputs_and_score() {
        let script = doctor_script(&input(), 10);
        assert!(script.contains("Chest Pain, Palpitations"));
        assert!(script.contains("Diabetes, Smoking"));
        assert!(script.contains("night sweats"));
        assert!(script.contains("father had a bypass at 60"));
        assert!(script.contains("scored 10 out of 10"));
    }

    #[test]
    fn doctor_script_with_empty_checklists() {
        let script = doctor_script(&AssessmentInput::default(), 0);
        assert!(script.contains("no specific symptoms from the checklist"));
        assert!(script.contains("none that I know of"));
    }

    #[test]
    fn clinician_summary_packs_structured_fields() {
        let summary = clinician_summary(&profile(), &input(), 10, UrgencyTier::Urgent);
        assert!(summary.starts_with("PT Diallo, Amara"));
        assert!(summary.contains("BP 150/95 mmHg"));
        assert!(summary.contains("Sx: chest_pain, palpitations"));
        assert!(summary.contains("Score 10/10"));
        assert!(summary.ends_with("URGENT"));
    }

    #[test]
    fn synthesize_is_idempotent_except_id_and_timestamp() {
        let profile = profile();
        let input = input();
        let score = compute_risk_score(&profile, &input);
        let tier = classify(score.value);

        let a = synthesize(&profile, &input, &score, tier);
        let b = synthesize(&profile, &input, &score, tier);

        assert_eq!(a.sections.patient_summary, b.sections.patient_summary);
        assert_eq!(a.sections.risk_breakdown, b.sections.risk_breakdown);
        assert_eq!(
            a.sections.vitals_interpretation,
            b.sections.vitals_interpretation
        );
        assert_eq!(a.sections.urgency, b.sections.urgency);
        assert_eq!(
            a.sections.suggested_diagnostics,
            b.sections.suggested_diagnostics
        );
        assert_eq!(
            a.sections.possible_conditions,
            b.sections.possible_conditions
        );
        assert_eq!(a.sections.doctor_script, b.sections.doctor_script);
        assert_eq!(a.sections.clinician_summary, b.sections.clinician_summary);
        assert_eq!(a.sections.disclaimer, b.sections.disclaimer);
        assert!(a.id.starts_with("RPT-"));
    }

    #[test]
    fn report_carries_disclaimer_and_tier() {
        let report = report();
        assert_eq!(report.sections.disclaimer, DISCLAIMER);
        assert_eq!(report.tier, UrgencyTier::Urgent);
        assert_eq!(report.score.value, 10);
        assert!(report
            .sections
            .urgency
            .contains("immediate specialist consultation"));
    }
}
