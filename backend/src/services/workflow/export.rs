//! Simulated metric exports.
//!
//! Two download blobs per workflow: one for a single term's metrics and one
//! for the aggregate. Each is comma-separated text with a fixed header row
//! and one illustrative data row; nothing downstream validates them against
//! a schema. `{{...}}` placeholder tokens in illustrative values are
//! substituted with sample figures, the same way the real generation path
//! would substitute student data.

use std::collections::HashMap;

use common::model::template::{Template, TemplateKind};
use common::model::workflow::{CohortKey, WorkflowSnapshot};
use regex::Regex;

use crate::services::workflow::actions::matching_template;

/// Replaces `{{token}}` occurrences using the sample value map; unknown
/// tokens become empty strings, mirroring the generation path's behavior for
/// unmapped columns.
pub fn substitute_tokens(text: &str, values: &HashMap<String, String>) -> String {
    let re = match Regex::new(r"\{\{([^}]+)\}\}") {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };
    re.replace_all(text, |caps: &regex::Captures| {
        values.get(caps[1].trim()).cloned().unwrap_or_default()
    })
    .into_owned()
}

fn sample_values() -> HashMap<String, String> {
    let mut values = HashMap::new();
    values.insert("student.name".to_string(), "Sample Student".to_string());
    values.insert("student.rollNo".to_string(), "UG/2025/0001".to_string());
    values.insert("student.status".to_string(), "Awaiting".to_string());
    values
}

fn write_rows(header: &[&str], row: &[String]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).map_err(|e| e.to_string())?;
    writer.write_record(row).map_err(|e| e.to_string())?;
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// CSV for one term's metrics. An uncalculated term exports empty GPA
/// fields rather than failing.
pub fn term_metrics_csv(
    snapshot: &WorkflowSnapshot,
    key: &CohortKey,
    term_id: &str,
) -> Result<String, String> {
    let (gpa, calculated_at) = match snapshot.calculation(term_id) {
        Some(calc) => (format!("{:.2}", calc.gpa), calc.calculated_at.clone()),
        None => (String::new(), String::new()),
    };
    write_rows(
        &["Program", "Cohort", "Term", "GPA", "Calculated At"],
        &[
            key.program.clone(),
            key.cohort.clone(),
            term_id.to_string(),
            gpa,
            calculated_at,
        ],
    )
}

/// CSV for the aggregate metrics. The illustrative student column comes from
/// the mapped transcript template's document, tokens substituted.
pub fn aggregate_metrics_csv(
    snapshot: &WorkflowSnapshot,
    key: &CohortKey,
    templates: &[Template],
) -> Result<String, String> {
    let student = matching_template(templates, TemplateKind::Transcript, key)
        .map(|t| substitute_tokens(&t.data.student.name, &sample_values()))
        .unwrap_or_default();
    let (gpa, through_term) = match &snapshot.aggregate {
        Some(aggregate) => (format!("{:.2}", aggregate.gpa), aggregate.through_term.clone()),
        None => (String::new(), String::new()),
    };
    write_rows(
        &["Program", "Cohort", "Student", "Aggregate GPA", "Through Term"],
        &[
            key.program.clone(),
            key.cohort.clone(),
            student,
            gpa,
            through_term,
        ],
    )
}
