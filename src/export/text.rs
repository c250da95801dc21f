//! Plain-text rendering of an assessment report.
//!
//! A straight serialization of the report's sections; no section text is
//! composed here, only framed.

use crate::assessment::Report;
use crate::config;

fn heading(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    out.push('\n');
}

/// Render the full report as displayable/downloadable text.
pub fn render_report(report: &Report) -> String {
    let banner = format!("{} CARDIAC RISK ASSESSMENT", config::APP_NAME.to_uppercase());
    let rule = "=".repeat(banner.len() + 4);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("  {banner}\n"));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Report ID: {}\n", report.id));
    out.push_str(&format!("Generated: {}\n", report.generated_at));

    heading(&mut out, "PATIENT SUMMARY");
    out.push_str(&report.sections.patient_summary);
    out.push('\n');

    heading(&mut out, "RISK BREAKDOWN");
    out.push_str(&report.sections.risk_breakdown);
    out.push('\n');

    heading(&mut out, "VITALS INTERPRETATION");
    out.push_str(&report.sections.vitals_interpretation);
    out.push('\n');

    heading(&mut out, "URGENCY");
    out.push_str(&report.sections.urgency);
    out.push('\n');

    heading(&mut out, "SUGGESTED DIAGNOSTICS");
    for (i, test) in report.sections.suggested_diagnostics.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, test));
    }

    heading(&mut out, "POSSIBLE CONDITIONS TO DISCUSS");
    if report.sections.possible_conditions.is_empty() {
        out.push_str("  No specific conditions flagged by the reported symptoms.\n");
    } else {
        for condition in &report.sections.possible_conditions {
            out.push_str(&format!("  - {condition}\n"));
        }
    }

    heading(&mut out, "WHAT TO TELL YOUR DOCTOR");
    out.push_str(&report.sections.doctor_script);
    out.push('\n');

    heading(&mut out, "CLINICIAN SUMMARY");
    out.push_str(&report.sections.clinician_summary);
    out.push('\n');

    heading(&mut out, "DISCLAIMER");
    out.push_str(&report.sections.disclaimer);
    out.push('\n');

    out
}
