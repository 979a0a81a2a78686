use serde::{Deserialize, Serialize};

/// Whether a term belongs to the in-classroom curriculum or to the
/// out-of-classroom (experiential) track. The preview renderer partitions
/// terms on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassType {
    InClass,
    OutClass,
}

/// One course row. All display fields are free-form strings; no numeric
/// validation is enforced anywhere (grades like "-" are legal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub credits: String,
    pub grade: String,
    pub gpa: String,
    pub percentage: String,
    /// e.g. "Core" or "Elective". Rendered as "Core" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
}

/// One academic period's ordered set of courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub class_type: ClassType,
    pub courses: Vec<Course>,
}
