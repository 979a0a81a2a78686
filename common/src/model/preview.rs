use serde::{Deserialize, Serialize};

/// A rendered label/value pair (student line or summary field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

/// One boxed per-term table of a grid block. `columns[0]` is the term name
/// (it doubles as the course column heading); the remaining columns are the
/// enabled optional columns in fixed order. Row cells align with `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermTable {
    pub term_id: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A consolidated list-format table. `columns` starts with the synthetic
/// "Term" column and the section label heading the course column; rows are
/// flattened across terms preserving term then course order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTable {
    pub section_label: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One block of the rendered page body, in page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageBlock {
    #[serde(rename_all = "camelCase")]
    GridTable { terms: Vec<TermTable> },
    #[serde(rename_all = "camelCase")]
    ListTable { table: CourseTable },
    #[serde(rename_all = "camelCase")]
    Summary {
        id: String,
        section_type: String,
        fields: Vec<LabeledValue>,
    },
}

/// Masthead of the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageHeader {
    pub logo: Option<String>,
    pub institute_name: String,
    pub sub_header: String,
    pub document_title: String,
    pub academic_year: String,
}

/// Signatory block of the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFooter {
    pub footer_text: String,
    pub signature: Option<String>,
    pub signatory_name: String,
    pub signatory_designation: String,
    pub date: String,
    pub location: String,
}

/// The laid-out page a document projects to. Produced by the preview
/// renderer; consumed by whichever surface draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPage {
    pub header: PageHeader,
    pub student_lines: Vec<LabeledValue>,
    pub blocks: Vec<PageBlock>,
    pub footer: PageFooter,
}
