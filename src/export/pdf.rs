//! PDF rendering via `printpdf`.
//!
//! A4 pages, builtin Helvetica, manual y-cursor layout. `PdfCursor`
//! owns the document and starts a fresh page whenever a write would run
//! into the bottom margin.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::assessment::Report;
use crate::config;
use crate::models::PatientProfile;

use super::ExportError;

struct PdfCursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: Mm,
}

impl PdfCursor {
    fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(210.0), Mm(297.0), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Font(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            font,
            bold,
            y: Mm(280.0),
        })
    }

    fn break_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = Mm(280.0);
    }

    /// Start a new page unless `needed_mm` still fits above the margin.
    fn ensure_space(&mut self, needed_mm: f64) {
        if self.y < Mm(20.0 + needed_mm as f32) {
            self.break_page();
        }
    }

    fn title(&mut self, text: &str) {
        self.layer.use_text(text, 14.0, Mm(20.0), self.y, &self.bold);
        self.y -= Mm(10.0);
    }

    fn meta_line(&mut self, text: &str) {
        self.layer.use_text(text, 9.0, Mm(20.0), self.y, &self.font);
        self.y -= Mm(4.5);
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(16.0);
        self.y -= Mm(4.0);
        self.layer.use_text(text, 11.0, Mm(20.0), self.y, &self.bold);
        self.y -= Mm(6.0);
    }

    /// Wrapped 9pt body text, indented under the heading.
    fn body(&mut self, text: &str) {
        for line in wrap_text(text, 90) {
            self.ensure_space(6.0);
            self.layer.use_text(&line, 9.0, Mm(25.0), self.y, &self.font);
            self.y -= Mm(4.5);
        }
    }

    /// Multi-line section text, preserving its own line breaks.
    fn body_block(&mut self, text: &str) {
        for raw in text.lines() {
            self.body(raw);
        }
    }

    /// Two-column label/value row; blank values are skipped entirely.
    fn field(&mut self, label: &str, value: &str) {
        if value.trim().is_empty() {
            return;
        }
        for (i, line) in wrap_text(value, 55).iter().enumerate() {
            self.ensure_space(8.0);
            if i == 0 {
                self.layer
                    .use_text(format!("{label}:"), 11.0, Mm(20.0), self.y, &self.font);
            }
            self.layer.use_text(line, 11.0, Mm(70.0), self.y, &self.font);
            self.y -= Mm(6.0);
        }
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ExportError::Write(e.to_string()))?;
        buf.into_inner()
            .map_err(|e| ExportError::Write(e.to_string()))
    }
}

/// Render an assessment report. Returns PDF bytes.
pub fn render_report(report: &Report) -> Result<Vec<u8>, ExportError> {
    let title = format!("{} Cardiac Risk Assessment", config::APP_NAME);
    let mut cur = PdfCursor::new(&title)?;

    cur.title(&title);
    cur.meta_line(&format!("Report ID: {}", report.id));
    cur.meta_line(&format!("Generated: {}", report.generated_at));

    cur.heading("PATIENT SUMMARY");
    cur.body_block(&report.sections.patient_summary);

    cur.heading("RISK BREAKDOWN");
    cur.body_block(&report.sections.risk_breakdown);

    cur.heading("VITALS INTERPRETATION");
    cur.body_block(&report.sections.vitals_interpretation);

    cur.heading("URGENCY");
    cur.body(&report.sections.urgency);

    cur.heading("SUGGESTED DIAGNOSTICS");
    for (i, test) in report.sections.suggested_diagnostics.iter().enumerate() {
        cur.body(&format!("{}. {}", i + 1, test));
    }

    cur.heading("POSSIBLE CONDITIONS TO DISCUSS");
    if report.sections.possible_conditions.is_empty() {
        cur.body("No specific conditions flagged by the reported symptoms.");
    } else {
        for condition in &report.sections.possible_conditions {
            cur.body(&format!("- {condition}"));
        }
    }

    cur.heading("WHAT TO TELL YOUR DOCTOR");
    cur.body(&report.sections.doctor_script);

    cur.heading("CLINICIAN SUMMARY");
    cur.body(&report.sections.clinician_summary);

    cur.heading("DISCLAIMER");
    cur.body(&report.sections.disclaimer);

    cur.finish()
}

/// Render the patient intake record. Returns PDF bytes.
pub fn render_patient_record(profile: &PatientProfile) -> Result<Vec<u8>, ExportError> {
    let title = format!("{} - Patient Information", config::APP_NAME);
    let mut cur = PdfCursor::new(&title)?;

    cur.title(&title);

    cur.heading("Personal Information");
    cur.field("First Name", &profile.first_name);
    cur.field("Last Name", &profile.last_name);
    cur.field("Email", &profile.email);
    cur.field("Phone", &profile.phone);
    cur.field(
        "Date of Birth",
        &profile
            .date_of_birth
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    cur.field("Age", &profile.age.to_string());
    cur.field("Gender", profile.gender.label());
    cur.field("Insurance Provider", &profile.insurance_provider);
    cur.field("Policy Number", &profile.policy_number);

    cur.heading("Physical Information");
    cur.field("Height", &format!("{:.1} cm", profile.height_cm()));
    cur.field("Weight", &format!("{:.1} kg", profile.weight_kg()));
    cur.field("BMI", &format!("{:.1}", profile.bmi()));
    cur.field("Blood Group", profile.blood_group.as_str());

    cur.heading("Emergency Contact");
    cur.field("Contact Name", &profile.emergency_contact_name);
    cur.field("Contact Phone", &profile.emergency_contact_phone);

    cur.heading("Medical Information");
    cur.field("Allergies", &profile.allergies);
    cur.field("Current Medications", &profile.medications);
    cur.field("Medical History", &profile.medical_history);

    // Footer pinned to the bottom margin of the final page
    cur.layer.use_text(
        format!("Generated on: {}", chrono::Utc::now().format("%Y-%m-%d")),
        8.0,
        Mm(20.0),
        Mm(15.0),
        &cur.font,
    );
    cur.layer.use_text(
        format!("{} Patient Information System", config::APP_NAME),
        8.0,
        Mm(20.0),
        Mm(10.0),
        &cur.font,
    );

    cur.finish()
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
