use serde::{Deserialize, Serialize};

use crate::editor::EditOp;
use crate::model::document::Document;

/// Request payload for the template save endpoint. `id` absent means create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplateRequest {
    pub id: Option<String>,
    pub name: String,
    pub data: Document,
}

/// Request payload for the editor apply endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditRequest {
    pub document: Document,
    pub op: EditOp,
}

/// Request payload for the simulated workflow actions. `term_id` is required
/// for per-term actions and ignored by final-document generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowActionRequest {
    pub program: String,
    pub cohort: String,
    pub term_id: Option<String>,
}
