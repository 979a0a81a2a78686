//! Pure mutation layer for the document model.
//!
//! Every operation is a function of (current document, arguments) producing a
//! new `Document`; a previously returned document is never mutated in place,
//! so any holder of an earlier value keeps observing it unchanged. The
//! operations mirror the editor controls one to one and are also deliverable
//! as messages: `EditOp` is the serializable form dispatched by `apply`.
//!
//! Unknown field keys and unknown summary-section ids are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::model::columns::{ColumnField, TableFormat, TableKind};
use crate::model::document::Document;
use crate::model::summary::{SummaryField, SummaryTableConfig};

/// One editor operation, in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditOp {
    #[serde(rename_all = "camelCase")]
    UpdateHeader { key: String, value: String },
    #[serde(rename_all = "camelCase")]
    UpdateStudent { key: String, value: String },
    #[serde(rename_all = "camelCase")]
    UpdateFooter { key: String, value: String },
    #[serde(rename_all = "camelCase")]
    ToggleColumn { table: TableKind, column: ColumnField },
    #[serde(rename_all = "camelCase")]
    UpdateColumnLabel {
        table: TableKind,
        column: ColumnField,
        label: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTableFormat { table: TableKind, format: TableFormat },
    ToggleUnifiedTables,
    #[serde(rename_all = "camelCase")]
    ToggleSummarySectionVisibility { section_id: String },
    #[serde(rename_all = "camelCase")]
    ToggleSummaryField {
        section_id: String,
        field: SummaryField,
    },
    #[serde(rename_all = "camelCase")]
    UpdateSummaryFieldLabel {
        section_id: String,
        field: SummaryField,
        label: String,
    },
}

/// Dispatches one operation against a document, returning the new value.
pub fn apply(doc: &Document, op: &EditOp) -> Document {
    match op {
        EditOp::UpdateHeader { key, value } => update_header(doc, key, value),
        EditOp::UpdateStudent { key, value } => update_student(doc, key, value),
        EditOp::UpdateFooter { key, value } => update_footer(doc, key, value),
        EditOp::ToggleColumn { table, column } => toggle_column(doc, *table, *column),
        EditOp::UpdateColumnLabel { table, column, label } => {
            update_column_label(doc, *table, *column, label)
        }
        EditOp::UpdateTableFormat { table, format } => update_table_format(doc, *table, *format),
        EditOp::ToggleUnifiedTables => toggle_unified_tables(doc),
        EditOp::ToggleSummarySectionVisibility { section_id } => {
            toggle_summary_section_visibility(doc, section_id)
        }
        EditOp::ToggleSummaryField { section_id, field } => {
            toggle_summary_field(doc, section_id, *field)
        }
        EditOp::UpdateSummaryFieldLabel { section_id, field, label } => {
            update_summary_field_label(doc, section_id, *field, label)
        }
    }
}

/// Shallow-merges one header field, addressed by its wire name.
pub fn update_header(doc: &Document, key: &str, value: &str) -> Document {
    let mut next = doc.clone();
    match key {
        "instituteName" => next.header.institute_name = value.to_string(),
        "subHeader" => next.header.sub_header = value.to_string(),
        "documentTitle" => next.header.document_title = value.to_string(),
        "academicYear" => next.header.academic_year = value.to_string(),
        "logo" => next.header.logo = Some(value.to_string()),
        _ => {}
    }
    next
}

/// Shallow-merges one student field, addressed by its wire name.
pub fn update_student(doc: &Document, key: &str, value: &str) -> Document {
    let mut next = doc.clone();
    match key {
        "name" => next.student.name = value.to_string(),
        "rollNo" => next.student.roll_no = value.to_string(),
        "status" => next.student.status = value.to_string(),
        _ => {}
    }
    next
}

/// Shallow-merges one footer field, addressed by its wire name.
pub fn update_footer(doc: &Document, key: &str, value: &str) -> Document {
    let mut next = doc.clone();
    match key {
        "signature" => next.footer.signature = Some(value.to_string()),
        "signatoryName" => next.footer.signatory_name = value.to_string(),
        "signatoryDesignation" => next.footer.signatory_designation = value.to_string(),
        "footerText" => next.footer.footer_text = value.to_string(),
        "date" => next.footer.date = value.to_string(),
        "location" => next.footer.location = value.to_string(),
        _ => {}
    }
    next
}

/// Flips one visibility flag in the named column configuration. The column's
/// label text is untouched.
pub fn toggle_column(doc: &Document, table: TableKind, column: ColumnField) -> Document {
    let mut next = doc.clone();
    let config = next.table_configs.get_mut(table);
    match column {
        ColumnField::CourseType => config.show_course_type = !config.show_course_type,
        ColumnField::Credits => config.show_credits = !config.show_credits,
        ColumnField::Grade => config.show_grade = !config.show_grade,
        ColumnField::Gpa => config.show_gpa = !config.show_gpa,
        ColumnField::Percentage => config.show_percentage = !config.show_percentage,
    }
    next
}

/// Sets a column's display label, independent of its visibility flag.
pub fn update_column_label(
    doc: &Document,
    table: TableKind,
    column: ColumnField,
    label: &str,
) -> Document {
    let mut next = doc.clone();
    let config = next.table_configs.get_mut(table);
    let slot = match column {
        ColumnField::CourseType => &mut config.course_type_label,
        ColumnField::Credits => &mut config.credits_label,
        ColumnField::Grade => &mut config.grade_label,
        ColumnField::Gpa => &mut config.gpa_label,
        ColumnField::Percentage => &mut config.percentage_label,
    };
    *slot = label.to_string();
    next
}

/// Sets the layout discriminator of the named column configuration.
pub fn update_table_format(doc: &Document, table: TableKind, format: TableFormat) -> Document {
    let mut next = doc.clone();
    next.table_configs.get_mut(table).format = format;
    next
}

/// Flips the document-level merged-table flag.
pub fn toggle_unified_tables(doc: &Document) -> Document {
    let mut next = doc.clone();
    next.is_unified_tables = !next.is_unified_tables;
    next
}

fn map_section(
    doc: &Document,
    section_id: &str,
    f: impl Fn(&mut SummaryTableConfig),
) -> Document {
    let mut next = doc.clone();
    for section in &mut next.summary_config.sections {
        if section.id == section_id {
            f(section);
        }
    }
    next
}

pub fn toggle_summary_section_visibility(doc: &Document, section_id: &str) -> Document {
    map_section(doc, section_id, |s| s.is_visible = !s.is_visible)
}

pub fn toggle_summary_field(doc: &Document, section_id: &str, field: SummaryField) -> Document {
    map_section(doc, section_id, |s| match field {
        SummaryField::CreditsRequired => s.show_credits_required = !s.show_credits_required,
        SummaryField::CreditsAwarded => s.show_credits_awarded = !s.show_credits_awarded,
        SummaryField::Cgpa => s.show_cgpa = !s.show_cgpa,
    })
}

pub fn update_summary_field_label(
    doc: &Document,
    section_id: &str,
    field: SummaryField,
    label: &str,
) -> Document {
    map_section(doc, section_id, |s| {
        let slot = match field {
            SummaryField::CreditsRequired => &mut s.credits_required_label,
            SummaryField::CreditsAwarded => &mut s.credits_awarded_label,
            SummaryField::Cgpa => &mut s.cgpa_label,
        };
        *slot = label.to_string();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::seed_document;

    #[test]
    fn update_header_replaces_one_field_and_nothing_else() {
        let doc = seed_document();
        let next = update_header(&doc, "instituteName", "Example Institute");
        assert_eq!(next.header.institute_name, "Example Institute");
        assert_eq!(next.header.sub_header, doc.header.sub_header);
        assert_eq!(next.student, doc.student);
        // the input document is a distinct, unchanged value
        assert_ne!(doc.header.institute_name, "Example Institute");
    }

    #[test]
    fn unknown_field_key_is_a_no_op() {
        let doc = seed_document();
        assert_eq!(update_header(&doc, "notAField", "x"), doc);
        assert_eq!(update_student(&doc, "notAField", "x"), doc);
        assert_eq!(update_footer(&doc, "notAField", "x"), doc);
    }

    #[test]
    fn toggle_column_twice_is_an_involution() {
        let doc = seed_document();
        let once = toggle_column(&doc, TableKind::InClass, ColumnField::Percentage);
        assert!(once.table_configs.in_class.show_percentage);
        let twice = toggle_column(&once, TableKind::InClass, ColumnField::Percentage);
        assert_eq!(twice, doc);
    }

    #[test]
    fn toggling_a_column_preserves_its_label() {
        let doc = seed_document();
        let labeled = update_column_label(&doc, TableKind::OutClass, ColumnField::Gpa, "Score");
        assert_eq!(labeled.table_configs.out_class.gpa_label, "Score");
        assert!(labeled.table_configs.out_class.show_gpa);
        let toggled = toggle_column(&labeled, TableKind::OutClass, ColumnField::Gpa);
        assert!(!toggled.table_configs.out_class.show_gpa);
        assert_eq!(toggled.table_configs.out_class.gpa_label, "Score");
    }

    #[test]
    fn update_table_format_only_touches_the_named_table() {
        let doc = seed_document();
        let next = update_table_format(&doc, TableKind::InClass, TableFormat::List);
        assert_eq!(next.table_configs.in_class.format, TableFormat::List);
        assert_eq!(next.table_configs.out_class, doc.table_configs.out_class);
    }

    #[test]
    fn toggle_unified_tables_flips_the_flag() {
        let doc = seed_document();
        assert!(!doc.is_unified_tables);
        let on = toggle_unified_tables(&doc);
        assert!(on.is_unified_tables);
        assert_eq!(toggle_unified_tables(&on), doc);
    }

    #[test]
    fn summary_ops_no_op_on_unknown_section_id() {
        let doc = seed_document();
        assert_eq!(toggle_summary_section_visibility(&doc, "nope"), doc);
        assert_eq!(toggle_summary_field(&doc, "nope", SummaryField::Cgpa), doc);
        assert_eq!(
            update_summary_field_label(&doc, "nope", SummaryField::Cgpa, "x"),
            doc
        );
    }

    #[test]
    fn summary_field_toggle_and_label_are_section_scoped() {
        let doc = seed_document();
        let next = toggle_summary_field(&doc, "outclass-default", SummaryField::CreditsAwarded);
        let outclass = next
            .summary_config
            .sections
            .iter()
            .find(|s| s.id == "outclass-default")
            .unwrap();
        assert!(!outclass.show_credits_awarded);
        let inclass = next
            .summary_config
            .sections
            .iter()
            .find(|s| s.id == "inclass-default")
            .unwrap();
        assert!(inclass.show_credits_awarded);

        let relabeled =
            update_summary_field_label(&next, "inclass-default", SummaryField::Cgpa, "GPA so far");
        let inclass = relabeled
            .summary_config
            .sections
            .iter()
            .find(|s| s.id == "inclass-default")
            .unwrap();
        assert_eq!(inclass.cgpa_label, "GPA so far");
        assert!(inclass.show_cgpa);
    }

    #[test]
    fn apply_dispatches_wire_ops() {
        let doc = seed_document();
        let op: EditOp = serde_json::from_str(
            r#"{"op":"updateStudent","key":"rollNo","value":"UG/2024/0007"}"#,
        )
        .unwrap();
        let next = apply(&doc, &op);
        assert_eq!(next.student.roll_no, "UG/2024/0007");

        let op: EditOp = serde_json::from_str(
            r#"{"op":"toggleColumn","table":"inClass","column":"courseType"}"#,
        )
        .unwrap();
        let next = apply(&next, &op);
        assert!(next.table_configs.in_class.show_course_type);

        let op: EditOp = serde_json::from_str(r#"{"op":"toggleUnifiedTables"}"#).unwrap();
        assert!(apply(&next, &op).is_unified_tables);
    }
}
