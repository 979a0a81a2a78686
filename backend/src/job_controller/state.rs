//! Tracks the state of simulated background actions.
//!
//! The workflow simulator schedules every GPA calculation and generation
//! action as a background job keyed by a deterministic action key (for
//! example `calc:<program>:<cohort>:<term>`). The key doubles as the guard
//! against double invocation: while a job under a key is still active, the
//! triggering endpoint refuses to schedule it again, mirroring the disabled
//! control in the designer UI.
//!
//! The components are:
//! - `JobsState`: a clonable, thread-safe map of action key to `JobStatus`,
//!   injected into the Actix application state in `main.rs`.
//! - `JobUpdate`: a message struct used by background tasks to report status
//!   changes.
//! - `start_job_updater`: a long-running task consuming `JobUpdate` messages
//!   from an MPSC channel and folding them into the shared map.

use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// A thread-safe, shareable container for the state of all simulated jobs.
#[derive(Clone)]
pub struct JobsState {
    /// Action key to current status. Single source of truth for the status
    /// polling endpoint and for the double-invocation guard.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Sender half of the channel the `start_job_updater` task consumes.
    /// Background tasks push status changes here instead of taking the write
    /// lock themselves.
    pub tx: mpsc::Sender<JobUpdate>,
}

/// A status change for one action key.
#[derive(Debug)]
pub struct JobUpdate {
    pub job_key: String,
    pub status: JobStatus,
}

/// Consumes `JobUpdate` messages and applies them to the shared map. Spawned
/// once at startup.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_key.clone(), update.status);
    }
}
