//! Patient intake repository.
//!
//! Every saved intake form is its own row; the "current" profile for a
//! session is simply the most recently created one, so a re-submitted
//! form wins without any update logic.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::{PatientDraft, PatientProfile};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn insert_profile(conn: &Connection, profile: &PatientProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR REPLACE INTO patients (
            id, first_name, last_name, email, phone, date_of_birth, age, gender,
            height_cm, weight_kg, bmi, blood_group, allergies, medications,
            medical_history, insurance_provider, policy_number,
            emergency_contact_name, emergency_contact_phone, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                 ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            profile.id.to_string(),
            profile.first_name,
            profile.last_name,
            profile.email,
            profile.phone,
            profile.date_of_birth.map(|d| d.to_string()),
            profile.age,
            profile.gender.as_str(),
            profile.height_cm(),
            profile.weight_kg(),
            profile.bmi(),
            profile.blood_group.as_str(),
            profile.allergies,
            profile.medications,
            profile.medical_history,
            profile.insurance_provider,
            profile.policy_number,
            profile.emergency_contact_name,
            profile.emergency_contact_phone,
            profile.created_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

/// Most-recently-created profile, or `None` when no intake has been saved.
pub fn latest_profile(conn: &Connection) -> Result<Option<PatientProfile>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, email, phone, date_of_birth, age, gender,
                height_cm, weight_kg, blood_group, allergies, medications,
                medical_history, insurance_provider, policy_number,
                emergency_contact_name, emergency_contact_phone, created_at
         FROM patients
         ORDER BY created_at DESC, rowid DESC
         LIMIT 1",
    )?;

    let row = stmt
        .query_row([], |row| {
            Ok(PatientRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                email: row.get(3)?,
                phone: row.get(4)?,
                date_of_birth: row.get(5)?,
                age: row.get(6)?,
                gender: row.get(7)?,
                height_cm: row.get(8)?,
                weight_kg: row.get(9)?,
                blood_group: row.get(10)?,
                allergies: row.get(11)?,
                medications: row.get(12)?,
                medical_history: row.get(13)?,
                insurance_provider: row.get(14)?,
                policy_number: row.get(15)?,
                emergency_contact_name: row.get(16)?,
                emergency_contact_phone: row.get(17)?,
                created_at: row.get(18)?,
            })
        })
        .optional()?;

    row.map(row_to_profile).transpose()
}

pub fn profile_count(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}

struct PatientRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    date_of_birth: Option<String>,
    age: u32,
    gender: String,
    height_cm: f64,
    weight_kg: f64,
    blood_group: String,
    allergies: String,
    medications: String,
    medical_history: String,
    insurance_provider: String,
    policy_number: String,
    emergency_contact_name: String,
    emergency_contact_phone: String,
    created_at: String,
}

fn row_to_profile(row: PatientRow) -> Result<PatientProfile, DatabaseError> {
    let id = Uuid::parse_str(&row.id).map_err(|_| DatabaseError::InvalidValue {
        field: "patients.id".into(),
        value: row.id.clone(),
    })?;
    let created_at = NaiveDateTime::parse_from_str(&row.created_at, DATETIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| DatabaseError::InvalidValue {
            field: "patients.created_at".into(),
            value: row.created_at.clone(),
        })?;

    let draft = PatientDraft {
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        date_of_birth: row
            .date_of_birth
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        age: row.age,
        gender: row.gender.parse()?,
        height_cm: row.height_cm,
        weight_kg: row.weight_kg,
        blood_group: row.blood_group.parse()?,
        allergies: row.allergies,
        medications: row.medications,
        medical_history: row.medical_history,
        insurance_provider: row.insurance_provider,
        policy_number: row.policy_number,
        emergency_contact_name: row.emergency_contact_name,
        emergency_contact_phone: row.emergency_contact_phone,
    };

    Ok(PatientProfile::restore(draft, id, created_at))
}
