pub mod assessment;
pub mod enums;
pub mod profile;

pub use assessment::{AssessmentInput, Vitals};
pub use enums::{BloodGroup, Gender, RiskFactor, Symptom};
pub use profile::{PatientDraft, PatientProfile};
