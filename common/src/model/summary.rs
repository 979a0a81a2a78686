use serde::{Deserialize, Serialize};

/// Addresses one of the three label/value pairs of a summary section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryField {
    CreditsRequired,
    CreditsAwarded,
    Cgpa,
}

/// Configuration for one summary table block.
///
/// `section_type` names the logical category ("InClass", "OutClass",
/// "Overall", or a custom value) and selects which `system_values` entry
/// supplies the displayed figures. New well-known sections are backfilled
/// into older saved documents keyed by `id`; see `crate::migrate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTableConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: String,
    /// Master switch; a hidden section renders nothing regardless of the
    /// per-field flags.
    pub is_visible: bool,
    pub show_credits_required: bool,
    pub credits_required_label: String,
    pub show_credits_awarded: bool,
    pub credits_awarded_label: String,
    #[serde(rename = "showCGPA")]
    pub show_cgpa: bool,
    pub cgpa_label: String,
}

impl SummaryTableConfig {
    pub fn field_shown(&self, field: SummaryField) -> bool {
        match field {
            SummaryField::CreditsRequired => self.show_credits_required,
            SummaryField::CreditsAwarded => self.show_credits_awarded,
            SummaryField::Cgpa => self.show_cgpa,
        }
    }

    /// A section produces output only if it is visible and at least one of
    /// its fields is enabled.
    pub fn renders(&self) -> bool {
        self.is_visible && (self.show_credits_required || self.show_credits_awarded || self.show_cgpa)
    }
}

/// Ordered list of summary sections. Render output order follows list order,
/// so this is a sequence, not a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryConfig {
    pub version: u32,
    pub sections: Vec<SummaryTableConfig>,
}
