//! Canonical default document.
//!
//! The seed a new design starts from, and the reference the load-time
//! migration backfills older saved documents against. The well-known summary
//! section ids (`inclass-default`, `outclass-default`, `overall-default`)
//! are stable contracts: migration is keyed on them.

use std::collections::HashMap;

use uuid::Uuid;

use crate::model::columns::{ColumnConfig, TableConfigs, TableFormat};
use crate::model::document::{CategoryValues, Document, Footer, Header, Student, SystemValues};
use crate::model::summary::{SummaryConfig, SummaryTableConfig};
use crate::model::term::{ClassType, Course, Term};

fn course(code: &str, name: &str, credits: &str, grade: &str, gpa: &str, percentage: &str, course_type: Option<&str>) -> Course {
    Course {
        id: Uuid::new_v4().to_string(),
        code: code.to_string(),
        name: name.to_string(),
        credits: credits.to_string(),
        grade: grade.to_string(),
        gpa: gpa.to_string(),
        percentage: percentage.to_string(),
        course_type: course_type.map(str::to_string),
    }
}

fn term(name: &str, class_type: ClassType, courses: Vec<Course>) -> Term {
    Term {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        class_type,
        courses,
    }
}

fn column_config(format: TableFormat) -> ColumnConfig {
    ColumnConfig {
        show_credits: true,
        credits_label: "Credits".to_string(),
        show_grade: true,
        grade_label: "Grade".to_string(),
        show_gpa: true,
        gpa_label: "GPA".to_string(),
        show_percentage: false,
        percentage_label: "Percentage".to_string(),
        show_course_type: false,
        course_type_label: "Type".to_string(),
        format,
    }
}

/// Default column configurations: grid for InClass, list for OutClass.
/// Substituted for legacy saved documents that predate `tableConfigs`.
pub fn default_table_configs() -> TableConfigs {
    TableConfigs {
        in_class: column_config(TableFormat::Grid),
        out_class: column_config(TableFormat::List),
    }
}

fn summary_section(
    id: &str,
    section_type: &str,
    is_visible: bool,
    credits_required_label: &str,
    cgpa_label: &str,
) -> SummaryTableConfig {
    SummaryTableConfig {
        id: id.to_string(),
        section_type: section_type.to_string(),
        is_visible,
        show_credits_required: true,
        credits_required_label: credits_required_label.to_string(),
        show_credits_awarded: true,
        credits_awarded_label: "Total Credits Awarded".to_string(),
        show_cgpa: true,
        cgpa_label: cgpa_label.to_string(),
    }
}

/// The canonical set of well-known summary sections.
pub fn default_summary_sections() -> Vec<SummaryTableConfig> {
    vec![
        summary_section(
            "inclass-default",
            "InClass",
            true,
            "Total Credits (InClass)",
            "InClass CGPA",
        ),
        summary_section(
            "outclass-default",
            "OutClass",
            false,
            "Total Credits (OutClass)",
            "OutClass CGPA",
        ),
        summary_section(
            "overall-default",
            "Overall",
            false,
            "Total Credits",
            "Overall CGPA",
        ),
    ]
}

fn seed_course_data() -> Vec<Term> {
    vec![
        term(
            "Term I",
            ClassType::InClass,
            vec![
                course("ADA1101", "Fundamentals of Statistics", "4", "B-", "2.33", "65%", Some("Core")),
                course("ENTP1001", "Art of Communication", "4", "D", "1.00", "45%", Some("Core")),
                course("ENTP1103", "Business and Legal Management", "4", "B", "2.67", "72%", Some("Elective")),
            ],
        ),
        term(
            "Term II",
            ClassType::InClass,
            vec![
                course("ENTP1102", "Fundamentals of Corporate Communication", "4", "A", "3.67", "88%", None),
                course("ENTP1305", "Macroeconomics | How Economy Affects Business", "4", "B+", "3.00", "78%", None),
            ],
        ),
        term(
            "Term I",
            ClassType::OutClass,
            vec![course("OC1201", "Dropshipping- First Paycheck Challenge", "10", "A", "3.67", "90%", None)],
        ),
        term(
            "Term II",
            ClassType::OutClass,
            vec![course("UGTBM28", "UG 28 Summer Internship 2025", "10", "A+", "4.00", "95%", None)],
        ),
        term(
            "Term III",
            ClassType::OutClass,
            vec![course("CCC28", "Content Creator Challenge", "10", "-", "-", "-", None)],
        ),
    ]
}

fn seed_system_values() -> SystemValues {
    let mut values = HashMap::new();
    values.insert(
        "InClass".to_string(),
        CategoryValues {
            credits_required: "100".to_string(),
            credits_awarded: "72".to_string(),
            cgpa: "3.07".to_string(),
        },
    );
    values.insert(
        "OutClass".to_string(),
        CategoryValues {
            credits_required: "30".to_string(),
            credits_awarded: "20".to_string(),
            cgpa: "2.56".to_string(),
        },
    );
    values.insert(
        "Overall".to_string(),
        CategoryValues {
            credits_required: "130".to_string(),
            credits_awarded: "92".to_string(),
            cgpa: "2.98".to_string(),
        },
    );
    values
}

/// The document a freshly created design starts from.
pub fn seed_document() -> Document {
    Document {
        header: Header {
            institute_name: "Masters' Union".to_string(),
            sub_header: "UG Programme in Technology and Business Management".to_string(),
            document_title: "Provisional Transcript".to_string(),
            academic_year: "Academic Year 2024 - 28".to_string(),
            logo: None,
        },
        student: Student {
            name: "Rahul Sharma".to_string(),
            roll_no: "PGP/2023/1042".to_string(),
            status: "Awaiting".to_string(),
        },
        course_data: seed_course_data(),
        table_configs: default_table_configs(),
        is_unified_tables: false,
        summary_config: SummaryConfig {
            version: 1,
            sections: default_summary_sections(),
        },
        system_values: seed_system_values(),
        footer: Footer {
            signature: None,
            signatory_name: "Swati Ganeti".to_string(),
            signatory_designation: "Director, Undergraduate Programmes".to_string(),
            footer_text: "On behalf of the Academic Council".to_string(),
            date: "January 14, 2026".to_string(),
            location: "Gurugram, India".to_string(),
        },
    }
}
