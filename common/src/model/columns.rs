use serde::{Deserialize, Serialize};

/// Layout of a course-table block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// One self-contained boxed table per term, header repeated per term.
    Grid,
    /// One consolidated table with a synthetic "Term" column.
    List,
}

/// Addresses one of the two column configurations of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableKind {
    InClass,
    OutClass,
}

/// Addresses a single optional column for toggle/label operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnField {
    CourseType,
    Credits,
    Grade,
    Gpa,
    Percentage,
}

/// Per class-type visibility flags and display labels for the optional
/// course-table columns, plus the layout discriminator.
///
/// Visibility and label are independent: toggling a column never touches its
/// label text, and relabeling a hidden column is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub show_credits: bool,
    pub credits_label: String,
    pub show_grade: bool,
    pub grade_label: String,
    #[serde(rename = "showGPA")]
    pub show_gpa: bool,
    pub gpa_label: String,
    pub show_percentage: bool,
    pub percentage_label: String,
    pub show_course_type: bool,
    pub course_type_label: String,
    pub format: TableFormat,
}

impl ColumnConfig {
    pub fn is_shown(&self, column: ColumnField) -> bool {
        match column {
            ColumnField::CourseType => self.show_course_type,
            ColumnField::Credits => self.show_credits,
            ColumnField::Grade => self.show_grade,
            ColumnField::Gpa => self.show_gpa,
            ColumnField::Percentage => self.show_percentage,
        }
    }

    pub fn label(&self, column: ColumnField) -> &str {
        match column {
            ColumnField::CourseType => &self.course_type_label,
            ColumnField::Credits => &self.credits_label,
            ColumnField::Grade => &self.grade_label,
            ColumnField::Gpa => &self.gpa_label,
            ColumnField::Percentage => &self.percentage_label,
        }
    }
}

/// The two column configurations of a document. In unified-table mode only
/// `in_class` drives rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfigs {
    pub in_class: ColumnConfig,
    pub out_class: ColumnConfig,
}

impl TableConfigs {
    pub fn get(&self, kind: TableKind) -> &ColumnConfig {
        match kind {
            TableKind::InClass => &self.in_class,
            TableKind::OutClass => &self.out_class,
        }
    }

    pub fn get_mut(&mut self, kind: TableKind) -> &mut ColumnConfig {
        match kind {
            TableKind::InClass => &mut self.in_class,
            TableKind::OutClass => &mut self.out_class,
        }
    }
}
