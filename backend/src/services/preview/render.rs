//! Pure projection from a document to its laid-out page.
//!
//! `render_page` is a function of the document value alone: the same input
//! always yields the same page, and rendering never mutates the document.
//!
//! View-selection rules:
//! 1. Terms partition into inClass (`type != OutClass`) and outClass.
//! 2. Unified mode renders one table (inClass then outClass terms) under the
//!    inClass column configuration, followed by InClass then OutClass
//!    summary sections.
//! 3. Split mode renders the inClass table (if it has terms) and InClass
//!    summaries, then the outClass table (if it has terms) and OutClass
//!    summaries.
//! 4. Overall summary sections always come last.
//! 5. Grid format emits one boxed table per term; list format emits a single
//!    table with a synthetic "Term" column, term labels stripped of a
//!    trailing " (OutClass)", rows flattened term-then-course order.
//! 6. Optional columns keep a fixed order (course-type, credits, grade, GPA,
//!    percentage); toggling one never reorders the others.

use actix_web::{web, Responder};
use common::migrate::migrate_document;
use common::model::columns::{ColumnConfig, ColumnField, TableFormat};
use common::model::document::Document;
use common::model::preview::{
    CourseTable, LabeledValue, PageBlock, PageFooter, PageHeader, PreviewPage, TermTable,
};
use common::model::term::{ClassType, Course, Term};

/// Handler for `POST /api/preview`: migrates the posted document and returns
/// its page projection.
pub async fn process(payload: web::Json<Document>) -> impl Responder {
    let document = migrate_document(&payload.into_inner());
    actix_web::HttpResponse::Ok().json(render_page(&document))
}

/// Fixed display order of the optional columns.
const COLUMN_ORDER: [ColumnField; 5] = [
    ColumnField::CourseType,
    ColumnField::Credits,
    ColumnField::Grade,
    ColumnField::Gpa,
    ColumnField::Percentage,
];

pub fn render_page(doc: &Document) -> PreviewPage {
    let in_class: Vec<&Term> = doc
        .course_data
        .iter()
        .filter(|t| t.class_type != ClassType::OutClass)
        .collect();
    let out_class: Vec<&Term> = doc
        .course_data
        .iter()
        .filter(|t| t.class_type == ClassType::OutClass)
        .collect();

    let mut blocks = Vec::new();
    if doc.is_unified_tables {
        let merged: Vec<&Term> = in_class.iter().chain(out_class.iter()).copied().collect();
        blocks.push(course_block(
            &merged,
            &doc.table_configs.in_class,
            "Combined Terms",
        ));
        push_summaries(&mut blocks, doc, "InClass");
        push_summaries(&mut blocks, doc, "OutClass");
    } else {
        if !in_class.is_empty() {
            blocks.push(course_block(&in_class, &doc.table_configs.in_class, "InClass"));
        }
        push_summaries(&mut blocks, doc, "InClass");
        if !out_class.is_empty() {
            blocks.push(course_block(
                &out_class,
                &doc.table_configs.out_class,
                "OutClass",
            ));
        }
        push_summaries(&mut blocks, doc, "OutClass");
    }
    push_summaries(&mut blocks, doc, "Overall");

    PreviewPage {
        header: PageHeader {
            logo: doc.header.logo.clone(),
            institute_name: doc.header.institute_name.clone(),
            sub_header: doc.header.sub_header.clone(),
            document_title: doc.header.document_title.clone(),
            academic_year: doc.header.academic_year.clone(),
        },
        student_lines: vec![
            labeled("Name", &doc.student.name),
            labeled("Roll No", &doc.student.roll_no),
            labeled("Graduation Status", &doc.student.status),
        ],
        blocks,
        footer: PageFooter {
            footer_text: doc.footer.footer_text.clone(),
            signature: doc.footer.signature.clone(),
            signatory_name: doc.footer.signatory_name.clone(),
            signatory_designation: doc.footer.signatory_designation.clone(),
            date: doc.footer.date.clone(),
            location: doc.footer.location.clone(),
        },
    }
}

fn labeled(label: &str, value: &str) -> LabeledValue {
    LabeledValue {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn course_block(terms: &[&Term], config: &ColumnConfig, section_label: &str) -> PageBlock {
    match config.format {
        TableFormat::Grid => PageBlock::GridTable {
            terms: terms.iter().map(|t| term_table(t, config)).collect(),
        },
        TableFormat::List => PageBlock::ListTable {
            table: list_table(terms, config, section_label),
        },
    }
}

fn enabled_columns(config: &ColumnConfig) -> Vec<ColumnField> {
    COLUMN_ORDER
        .iter()
        .copied()
        .filter(|c| config.is_shown(*c))
        .collect()
}

/// Course identity cell: code and name joined, as printed on the page.
fn identity_cell(course: &Course) -> String {
    format!("{} {}", course.code, course.name)
}

fn value_cell(course: &Course, column: ColumnField) -> String {
    match column {
        ColumnField::CourseType => course.course_type.clone().unwrap_or_else(|| "Core".to_string()),
        ColumnField::Credits => course.credits.clone(),
        ColumnField::Grade => course.grade.clone(),
        ColumnField::Gpa => course.gpa.clone(),
        ColumnField::Percentage => course.percentage.clone(),
    }
}

/// One boxed per-term table. The term name doubles as the course column
/// heading, so the header is repeated per term.
fn term_table(term: &Term, config: &ColumnConfig) -> TermTable {
    let enabled = enabled_columns(config);
    let mut columns = vec![term.name.clone()];
    columns.extend(enabled.iter().map(|c| config.label(*c).to_string()));
    let rows = term
        .courses
        .iter()
        .map(|course| {
            let mut row = vec![identity_cell(course)];
            row.extend(enabled.iter().map(|c| value_cell(course, *c)));
            row
        })
        .collect();
    TermTable {
        term_id: term.id.clone(),
        columns,
        rows,
    }
}

/// List-format term label: the " (OutClass)" marker some designs append to
/// term names is stripped because the section context already conveys it.
fn term_label(term: &Term) -> String {
    term.name.replace(" (OutClass)", "")
}

fn list_table(terms: &[&Term], config: &ColumnConfig, section_label: &str) -> CourseTable {
    let enabled = enabled_columns(config);
    let mut columns = vec!["Term".to_string(), section_label.to_string()];
    columns.extend(enabled.iter().map(|c| config.label(*c).to_string()));
    let mut rows = Vec::new();
    for term in terms {
        for course in &term.courses {
            let mut row = vec![term_label(term), identity_cell(course)];
            row.extend(enabled.iter().map(|c| value_cell(course, *c)));
            rows.push(row);
        }
    }
    CourseTable {
        section_label: section_label.to_string(),
        columns,
        rows,
    }
}

/// Appends every renderable summary section of the given category, using the
/// section's own label text and the externally supplied figures. A missing
/// `system_values` category renders empty values, not an error.
fn push_summaries(blocks: &mut Vec<PageBlock>, doc: &Document, category: &str) {
    for section in &doc.summary_config.sections {
        if section.section_type != category || !section.renders() {
            continue;
        }
        let values = doc.system_values.get(category).cloned().unwrap_or_default();
        let mut fields = Vec::new();
        if section.show_credits_required {
            fields.push(labeled(&section.credits_required_label, &values.credits_required));
        }
        if section.show_credits_awarded {
            fields.push(labeled(&section.credits_awarded_label, &values.credits_awarded));
        }
        if section.show_cgpa {
            fields.push(labeled(&section.cgpa_label, &values.cgpa));
        }
        blocks.push(PageBlock::Summary {
            id: section.id.clone(),
            section_type: section.section_type.clone(),
            fields,
        });
    }
}
