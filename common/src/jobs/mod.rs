use serde::Serialize;

/// Status of a simulated background action (GPA calculation, report or
/// document generation). While a job for a given action key is `Pending` or
/// `InProgress`, a second invocation of the same action is refused.
#[derive(Clone, Debug, Serialize)]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed(String),
    Failed(String),
}

impl JobStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::InProgress)
    }
}
