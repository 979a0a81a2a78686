use serde::{Deserialize, Serialize};

use crate::model::document::Document;

/// Which generation action a template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Transcript,
    TermReport,
}

fn default_kinds() -> Vec<TemplateKind> {
    vec![TemplateKind::Transcript]
}

/// A saved, named document design plus its program/cohort/type mapping.
///
/// `id` is assigned at creation and immutable thereafter; `last_modified` is
/// refreshed on every save. Templates saved before type mapping existed
/// deserialize with `types = ["transcript"]`.
///
/// Invariant (enforced by the template store, not by this type): a cohort
/// value is claimed by at most one template at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub last_modified: String,
    #[serde(default = "default_kinds")]
    pub types: Vec<TemplateKind>,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub cohorts: Vec<String>,
    pub data: Document,
}

impl Template {
    /// True if this template applies to the given generation action for the
    /// given program/cohort selection.
    pub fn matches(&self, kind: TemplateKind, program: &str, cohort: &str) -> bool {
        self.types.contains(&kind)
            && self.programs.iter().any(|p| p == program)
            && self.cohorts.iter().any(|c| c == cohort)
    }
}

/// Partial mapping-metadata update applied by the template store's
/// `patch_meta`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetaPatch {
    pub types: Option<Vec<TemplateKind>>,
    pub programs: Option<Vec<String>>,
    pub cohorts: Option<Vec<String>>,
}
