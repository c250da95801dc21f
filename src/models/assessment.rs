use serde::{Deserialize, Serialize};

use super::enums::{RiskFactor, Symptom};

/// Vitals snapshot entered on the assessment form.
///
/// Every field is optional: a vital the patient did not enter is `None`
/// and contributes nothing to the risk score. An explicit `0` is still a
/// recorded (if implausible) measurement and is scored as such.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vitals {
    #[serde(default)]
    pub systolic_bp: Option<f64>,
    #[serde(default)]
    pub diastolic_bp: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub spo2: Option<f64>,
    #[serde(default)]
    pub temperature_f: Option<f64>,
}

impl Vitals {
    /// All present values are non-negative. The API layer rejects
    /// payloads where this fails.
    pub fn all_non_negative(&self) -> bool {
        [
            self.systolic_bp,
            self.diastolic_bp,
            self.heart_rate,
            self.spo2,
            self.temperature_f,
        ]
        .iter()
        .flatten()
        .all(|v| *v >= 0.0)
    }
}

/// Per-report clinical snapshot. Built fresh for each assessment and
/// discarded afterwards; only the report keeps a copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    pub vitals: Vitals,
    #[serde(default)]
    pub additional_symptoms: String,
    #[serde(default)]
    pub family_history: String,
}

impl AssessmentInput {
    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }

    pub fn has_risk_factor(&self, factor: RiskFactor) -> bool {
        self.risk_factors.contains(&factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_all_fields_absent() {
        let input: AssessmentInput = serde_json::from_str("{}").unwrap();
        assert!(input.symptoms.is_empty());
        assert!(input.risk_factors.is_empty());
        assert!(input.vitals.systolic_bp.is_none());
        assert!(input.vitals.spo2.is_none());
    }

    #[test]
    fn deserializes_full_payload() {
        let json = r#"{
            "symptoms": ["chest_pain", "palpitations"],
            "risk_factors": ["diabetes", "smoking"],
            "vitals": {"systolic_bp": 150, "diastolic_bp": 95, "heart_rate": 110, "spo2": 92},
            "additional_symptoms": "occasional night sweats",
            "family_history": "father had CABG at 60"
        }"#;
        let input: AssessmentInput = serde_json::from_str(json).unwrap();
        assert!(input.has_symptom(Symptom::ChestPain));
        assert!(input.has_risk_factor(RiskFactor::Smoking));
        assert_eq!(input.vitals.heart_rate, Some(110.0));
        assert!(input.vitals.temperature_f.is_none());
    }

    #[test]
    fn non_numeric_vital_is_rejected() {
        let json = r#"{"vitals": {"heart_rate": "abc"}}"#;
        assert!(serde_json::from_str::<AssessmentInput>(json).is_err());
    }

    #[test]
    fn negative_vitals_detected() {
        let vitals = Vitals {
            spo2: Some(-1.0),
            ..Vitals::default()
        };
        assert!(!vitals.all_non_negative());
        assert!(Vitals::default().all_non_negative());
    }
}
