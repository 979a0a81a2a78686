use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::columns::TableConfigs;
use crate::model::summary::SummaryConfig;
use crate::model::term::Term;

/// Masthead of the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub institute_name: String,
    pub sub_header: String,
    pub document_title: String,
    pub academic_year: String,
    /// Base64 image data, if a logo was uploaded.
    pub logo: Option<String>,
}

/// Student identity lines. Values are free-form and may embed placeholder
/// tokens such as `{{student.name}}` for a downstream renderer to substitute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: String,
    pub roll_no: String,
    pub status: String,
}

/// Externally supplied display figures for one summary category. These are
/// never computed here; the designer only decides how they are shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValues {
    pub credits_required: String,
    pub credits_awarded: String,
    pub cgpa: String,
}

/// Category name ("InClass", "OutClass", "Overall", ...) to its figures.
pub type SystemValues = HashMap<String, CategoryValues>;

/// Signatory block at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    /// Base64 signature image; when absent the signatory name is rendered in
    /// a script face instead.
    pub signature: Option<String>,
    pub signatory_name: String,
    pub signatory_designation: String,
    pub footer_text: String,
    pub date: String,
    pub location: String,
}

/// The full editable transcript layout/content payload.
///
/// This is a value type: every mutation in `crate::editor` produces a new
/// `Document`, so holders of an earlier instance never observe changes.
/// Legacy saved shapes without `tableConfigs` pick up the canonical default
/// at the serde boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub header: Header,
    pub student: Student,
    pub course_data: Vec<Term>,
    #[serde(default = "crate::defaults::default_table_configs")]
    pub table_configs: TableConfigs,
    /// When true, InClass and OutClass terms render as one merged table
    /// driven by the InClass column configuration.
    #[serde(default)]
    pub is_unified_tables: bool,
    pub summary_config: SummaryConfig,
    pub system_values: SystemValues,
    pub footer: Footer,
}
