use serde::{Deserialize, Serialize};

/// Composite key identifying one simulated workflow: a (program, cohort)
/// pair.
///
/// Replaces the string-concatenation key scheme of earlier revisions with an
/// explicit type. The persisted key is still `calc_state_<program>_<cohort>`;
/// program or cohort names embedding the `_` separator could collide in
/// storage. Known limitation, not defended against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortKey {
    pub program: String,
    pub cohort: String,
}

impl CohortKey {
    pub fn new(program: impl Into<String>, cohort: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cohort: cohort.into(),
        }
    }

    /// Blob-store key for this workflow's snapshot.
    pub fn storage_key(&self) -> String {
        format!("calc_state_{}_{}", self.program, self.cohort)
    }
}

/// One term's simulated GPA calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermCalculation {
    pub term_id: String,
    pub gpa: f64,
    pub calculated_at: String,
}

/// Aggregate over all calculated terms of a workflow.
///
/// `through_term` is the id of the last entry in calculation order, which is
/// the order terms were first calculated in, not necessarily chronological
/// term order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateGpa {
    pub gpa: f64,
    pub through_term: String,
}

/// Persisted simulated state for one (program, cohort) pair.
///
/// `calculations` and `reports_generated` are ordered sequences: calculation
/// order is a visible contract (it drives `through_term`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    #[serde(default)]
    pub calculations: Vec<TermCalculation>,
    #[serde(default)]
    pub aggregate: Option<AggregateGpa>,
    /// Term ids a report has been generated for, in generation order.
    #[serde(default)]
    pub reports_generated: Vec<String>,
    #[serde(default)]
    pub final_generated: bool,
}

impl WorkflowSnapshot {
    pub fn calculation(&self, term_id: &str) -> Option<&TermCalculation> {
        self.calculations.iter().find(|c| c.term_id == term_id)
    }
}

/// Kind of state-changing simulator action, for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    CalculateGpa,
    GenerateTermReport,
    GenerateFinalDocument,
}

/// One immutable entry of the append-only audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub timestamp: String,
    pub program: String,
    pub cohort: String,
    pub action: AuditAction,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
