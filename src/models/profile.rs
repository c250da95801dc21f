use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{BloodGroup, Gender};

/// Intake form payload. Everything the patient types in, nothing derived:
/// no id, no BMI, no timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub medications: String,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub insurance_provider: String,
    #[serde(default)]
    pub policy_number: String,
    #[serde(default)]
    pub emergency_contact_name: String,
    #[serde(default)]
    pub emergency_contact_phone: String,
}

impl PatientDraft {
    /// Form-level validation. Field-type errors (wrong JSON types) are
    /// already rejected by serde before this runs.
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err("First and last name are required".into());
        }
        if self.height_cm <= 0.0 {
            return Err("Height must be a positive number of centimeters".into());
        }
        if self.weight_kg <= 0.0 {
            return Err("Weight must be a positive number of kilograms".into());
        }
        Ok(())
    }
}

/// Demographic and clinical baseline for one patient.
///
/// `height_cm`, `weight_kg` and `bmi` are private: BMI is derived
/// (weight / (height/100)², 1 decimal) and recomputed on every height or
/// weight change. It can never go stale or be set on its own.
#[derive(Debug, Clone, Serialize)]
pub struct PatientProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: u32,
    pub gender: Gender,
    height_cm: f64,
    weight_kg: f64,
    bmi: f64,
    pub blood_group: BloodGroup,
    pub allergies: String,
    pub medications: String,
    pub medical_history: String,
    pub insurance_provider: String,
    pub policy_number: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub created_at: NaiveDateTime,
}

/// Age bracket used in the patient summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Pediatric,
    Adult,
    Senior,
}

impl AgeBracket {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pediatric => "pediatric",
            Self::Adult => "adult",
            Self::Senior => "senior",
        }
    }
}

/// BMI category used in the patient summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

/// BMI = weight_kg / (height_cm/100)², rounded to 1 decimal.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let meters = height_cm / 100.0;
    (weight_kg / (meters * meters) * 10.0).round() / 10.0
}

impl PatientProfile {
    /// Build a fresh profile from a validated intake draft.
    pub fn from_draft(draft: PatientDraft) -> Self {
        Self::restore(draft, Uuid::new_v4(), Utc::now().naive_utc())
    }

    /// Rebuild a profile from stored parts. BMI is recomputed from the
    /// stored height/weight rather than trusted.
    pub(crate) fn restore(draft: PatientDraft, id: Uuid, created_at: NaiveDateTime) -> Self {
        let bmi = compute_bmi(draft.weight_kg, draft.height_cm);
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            date_of_birth: draft.date_of_birth,
            age: draft.age,
            gender: draft.gender,
            height_cm: draft.height_cm,
            weight_kg: draft.weight_kg,
            bmi,
            blood_group: draft.blood_group,
            allergies: draft.allergies,
            medications: draft.medications,
            medical_history: draft.medical_history,
            insurance_provider: draft.insurance_provider,
            policy_number: draft.policy_number,
            emergency_contact_name: draft.emergency_contact_name,
            emergency_contact_phone: draft.emergency_contact_phone,
            created_at,
        }
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn set_height_cm(&mut self, height_cm: f64) {
        self.height_cm = height_cm;
        self.bmi = compute_bmi(self.weight_kg, self.height_cm);
    }

    pub fn set_weight_kg(&mut self, weight_kg: f64) {
        self.weight_kg = weight_kg;
        self.bmi = compute_bmi(self.weight_kg, self.height_cm);
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Pediatric < 18, adult 18–64, senior >= 65.
    pub fn age_bracket(&self) -> AgeBracket {
        match self.age {
            0..=17 => AgeBracket::Pediatric,
            18..=64 => AgeBracket::Adult,
            _ => AgeBracket::Senior,
        }
    }

    /// Underweight < 18.5, Normal < 25, Overweight < 30, Obese >= 30.
    pub fn bmi_category(&self) -> BmiCategory {
        if self.bmi < 18.5 {
            BmiCategory::Underweight
        } else if self.bmi < 25.0 {
            BmiCategory::Normal
        } else if self.bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn draft(age: u32, height_cm: f64, weight_kg: f64) -> PatientDraft {
        PatientDraft {
            first_name: "Jordan".into(),
            last_name: "Reyes".into(),
            email: "jordan.reyes@example.com".into(),
            phone: "+1 (555) 123-4567".into(),
            date_of_birth: None,
            age,
            gender: Gender::Female,
            height_cm,
            weight_kg,
            blood_group: BloodGroup::OPositive,
            allergies: "None known".into(),
            medications: "None".into(),
            medical_history: "Unremarkable".into(),
            insurance_provider: "Acme Health".into(),
            policy_number: "POL-1234".into(),
            emergency_contact_name: "Sam Reyes".into(),
            emergency_contact_phone: "+1 (555) 987-6543".into(),
        }
    }

    #[test]
    fn bmi_computed_and_rounded() {
        // 70 kg at 170 cm: 70 / 1.7² = 24.221… -> 24.2
        assert_eq!(compute_bmi(70.0, 170.0), 24.2);
        // 95 kg at 172 cm: 95 / 1.72² = 32.11… -> 32.1
        assert_eq!(compute_bmi(95.0, 172.0), 32.1);
    }

    #[test]
    fn from_draft_derives_bmi() {
        let profile = PatientProfile::from_draft(draft(40, 170.0, 70.0));
        assert_eq!(profile.bmi(), 24.2);
        assert!(!profile.id.is_nil());
    }

    #[test]
    fn bmi_recomputed_on_weight_change() {
        let mut profile = PatientProfile::from_draft(draft(40, 170.0, 70.0));
        profile.set_weight_kg(90.0);
        assert_eq!(profile.bmi(), compute_bmi(90.0, 170.0));
    }

    #[test]
    fn bmi_recomputed_on_height_change() {
        let mut profile = PatientProfile::from_draft(draft(40, 170.0, 70.0));
        profile.set_height_cm(180.0);
        assert_eq!(profile.bmi(), compute_bmi(70.0, 180.0));
    }

    #[test]
    fn age_brackets() {
        assert_eq!(
            PatientProfile::from_draft(draft(17, 160.0, 50.0)).age_bracket(),
            AgeBracket::Pediatric
        );
        assert_eq!(
            PatientProfile::from_draft(draft(18, 160.0, 50.0)).age_bracket(),
            AgeBracket::Adult
        );
        assert_eq!(
            PatientProfile::from_draft(draft(64, 160.0, 50.0)).age_bracket(),
            AgeBracket::Adult
        );
        assert_eq!(
            PatientProfile::from_draft(draft(65, 160.0, 50.0)).age_bracket(),
            AgeBracket::Senior
        );
    }

    #[test]
    fn bmi_categories() {
        let mut p = PatientProfile::from_draft(draft(40, 170.0, 70.0));
        p.set_weight_kg(50.0); // BMI 17.3
        assert_eq!(p.bmi_category(), BmiCategory::Underweight);
        p.set_weight_kg(65.0); // BMI 22.5
        assert_eq!(p.bmi_category(), BmiCategory::Normal);
        p.set_weight_kg(80.0); // BMI 27.7
        assert_eq!(p.bmi_category(), BmiCategory::Overweight);
        p.set_weight_kg(90.0); // BMI 31.1
        assert_eq!(p.bmi_category(), BmiCategory::Obese);
    }

    #[test]
    fn validate_rejects_blank_names() {
        let mut d = draft(40, 170.0, 70.0);
        d.first_name = "  ".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn validate_rejects_nonpositive_measurements() {
        let mut d = draft(40, 170.0, 70.0);
        d.height_cm = 0.0;
        assert!(d.validate().is_err());

        let mut d = draft(40, 170.0, 70.0);
        d.weight_kg = -1.0;
        assert!(d.validate().is_err());
    }
}
