//! # Mock Workflow Simulator
//!
//! Simulates the per-(program, cohort) generation workflow the designer's
//! dashboard drives: GPA calculation per term, term-report generation, and
//! final-document generation. Calculations and generation are placeholders
//! (fixed delay, random figures) standing in for external services; what is
//! real here is the gating on template mappings, the persisted snapshot, and
//! the append-only audit trail.
//!
//! Every action runs as a background job keyed by a deterministic action key
//! (see `job_controller`): the triggering endpoint registers the job as
//! `Pending`, spawns the work, and returns the key for status polling. A
//! second invocation while the key is still active is refused.
//!
//! ## Registered routes (under `/api/workflow`):
//! - `GET /state/{program}/{cohort}`: current snapshot (default-empty).
//! - `POST /calculate`: schedule a term GPA calculation.
//! - `POST /report`: schedule term-report generation (gated on a mapped
//!   term-report template; 409 with a message when none matches).
//! - `POST /document`: schedule final-document generation (gated on a
//!   mapped transcript template).
//! - `GET /status/{job_key}`: poll a scheduled action.
//! - `GET /audit`: the full audit log, oldest first.
//! - `GET /export/term/{program}/{cohort}/{term_id}`: CSV download of one
//!   term's metrics.
//! - `GET /export/aggregate/{program}/{cohort}`: CSV download of the
//!   aggregate metrics.

pub mod actions;
pub mod export;
pub mod scoring;
pub mod state;

use std::future::Future;

use actix_web::web::{get, post, scope};
use actix_web::{web, HttpResponse, Responder, Scope};
use common::jobs::JobStatus;
use common::model::template::TemplateKind;
use common::model::workflow::{CohortKey, WorkflowSnapshot};
use common::requests::WorkflowActionRequest;

use crate::job_controller::state::JobUpdate;
use crate::services::templates::store::load_templates;
use crate::services::workflow::actions::{matching_template, missing_template_message};
use crate::AppState;

const API_PATH: &str = "/api/workflow";

/// Stand-in actor recorded in the audit trail; authentication is out of
/// scope, so every action is attributed to the designer seat.
const ACTOR: &str = "designer-admin";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/state/{program}/{cohort}", get().to(snapshot))
        .route("/calculate", post().to(calculate))
        .route("/report", post().to(report))
        .route("/document", post().to(document))
        .route("/status/{job_key}", get().to(status))
        .route("/audit", get().to(audit))
        .route("/export/term/{program}/{cohort}/{term_id}", get().to(export_term))
        .route("/export/aggregate/{program}/{cohort}", get().to(export_aggregate))
}

/// Registers `job_key` as pending and spawns the work, reporting progress
/// through the central job updater. Refuses the key while a previous job
/// under it is still active.
async fn schedule<F>(state: &AppState, job_key: String, work: F) -> Result<(), String>
where
    F: Future<Output = Result<WorkflowSnapshot, String>> + Send + 'static,
{
    {
        let mut jobs = state.jobs.jobs.write().await;
        if jobs.get(&job_key).map(JobStatus::is_active).unwrap_or(false) {
            return Err("This action is already in progress.".to_string());
        }
        jobs.insert(job_key.clone(), JobStatus::Pending);
    }

    let tx = state.jobs.tx.clone();
    tokio::spawn(async move {
        let _ = tx
            .send(JobUpdate {
                job_key: job_key.clone(),
                status: JobStatus::InProgress,
            })
            .await;
        let status = match work.await {
            Ok(_) => JobStatus::Completed("Action completed".to_string()),
            Err(e) => JobStatus::Failed(e),
        };
        let _ = tx.send(JobUpdate { job_key, status }).await;
    });
    Ok(())
}

async fn snapshot(state: web::Data<AppState>, path: web::Path<(String, String)>) -> impl Responder {
    let (program, cohort) = path.into_inner();
    let key = CohortKey::new(program, cohort);
    HttpResponse::Ok().json(state::load_snapshot(state.store.as_ref(), &key))
}

async fn calculate(
    state: web::Data<AppState>,
    payload: web::Json<WorkflowActionRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let Some(term_id) = req.term_id else {
        return HttpResponse::BadRequest().body("termId is required");
    };
    let key = CohortKey::new(req.program, req.cohort);
    let job_key = format!("calc:{}:{}:{}", key.program, key.cohort, term_id);

    let store = state.store.clone();
    let scoring = state.scoring.clone();
    let work_key = key.clone();
    let work = async move {
        actions::run_calculation(store.as_ref(), scoring.as_ref(), &work_key, &term_id, ACTOR).await
    };
    match schedule(&state, job_key.clone(), work).await {
        Ok(()) => HttpResponse::Accepted().json(serde_json::json!({ "jobKey": job_key })),
        Err(e) => HttpResponse::Conflict().body(e),
    }
}

async fn report(
    state: web::Data<AppState>,
    payload: web::Json<WorkflowActionRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let Some(term_id) = req.term_id else {
        return HttpResponse::BadRequest().body("termId is required");
    };
    let key = CohortKey::new(req.program, req.cohort);

    // Gate before scheduling anything: a missing mapping is a blocking
    // message to the user, not a failed job.
    let templates = load_templates(state.store.as_ref());
    if matching_template(&templates, TemplateKind::TermReport, &key).is_none() {
        return HttpResponse::Conflict()
            .body(missing_template_message(TemplateKind::TermReport, &key));
    }

    let job_key = format!("report:{}:{}:{}", key.program, key.cohort, term_id);
    let store = state.store.clone();
    let generator = state.generator.clone();
    let work_key = key.clone();
    let work = async move {
        actions::run_term_report(store.as_ref(), generator.as_ref(), &work_key, &term_id, ACTOR)
            .await
    };
    match schedule(&state, job_key.clone(), work).await {
        Ok(()) => HttpResponse::Accepted().json(serde_json::json!({ "jobKey": job_key })),
        Err(e) => HttpResponse::Conflict().body(e),
    }
}

async fn document(
    state: web::Data<AppState>,
    payload: web::Json<WorkflowActionRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let key = CohortKey::new(req.program, req.cohort);

    let templates = load_templates(state.store.as_ref());
    if matching_template(&templates, TemplateKind::Transcript, &key).is_none() {
        return HttpResponse::Conflict()
            .body(missing_template_message(TemplateKind::Transcript, &key));
    }

    let job_key = format!("document:{}:{}", key.program, key.cohort);
    let store = state.store.clone();
    let generator = state.generator.clone();
    let work_key = key.clone();
    let work = async move {
        actions::run_final_document(store.as_ref(), generator.as_ref(), &work_key, ACTOR).await
    };
    match schedule(&state, job_key.clone(), work).await {
        Ok(()) => HttpResponse::Accepted().json(serde_json::json!({ "jobKey": job_key })),
        Err(e) => HttpResponse::Conflict().body(e),
    }
}

async fn status(state: web::Data<AppState>, job_key: web::Path<String>) -> impl Responder {
    let jobs = state.jobs.jobs.read().await;
    match jobs.get(&job_key.into_inner()) {
        Some(status) => HttpResponse::Ok().json(status),
        None => HttpResponse::NotFound().body("Job key not found"),
    }
}

async fn audit(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state::load_audit_log(state.store.as_ref()))
}

async fn export_term(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> impl Responder {
    let (program, cohort, term_id) = path.into_inner();
    let key = CohortKey::new(program, cohort);
    let snapshot = state::load_snapshot(state.store.as_ref(), &key);
    match export::term_metrics_csv(&snapshot, &key, &term_id) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}_term_metrics.csv\"", term_id),
            ))
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().body(format!("Export failed: {}", e)),
    }
}

async fn export_aggregate(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (program, cohort) = path.into_inner();
    let key = CohortKey::new(program, cohort);
    let snapshot = state::load_snapshot(state.store.as_ref(), &key);
    let templates = load_templates(state.store.as_ref());
    match export::aggregate_metrics_csv(&snapshot, &key, &templates) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"aggregate_metrics.csv\"",
            ))
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().body(format!("Export failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_controller::state::{start_job_updater, JobsState};
    use crate::services::workflow::scoring::{MockDocumentGenerator, MockScoringService};
    use crate::storage::MemoryStore;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{mpsc, oneshot, RwLock};

    fn app_state() -> AppState {
        let (tx, rx) = mpsc::channel(100);
        let jobs = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        let updater = jobs.clone();
        tokio::spawn(async move { start_job_updater(updater, rx).await });
        AppState {
            store: Arc::new(MemoryStore::default()),
            jobs,
            scoring: Arc::new(MockScoringService {
                delay: Duration::ZERO,
            }),
            generator: Arc::new(MockDocumentGenerator {
                delay: Duration::ZERO,
            }),
        }
    }

    /// Polls the job map until the key leaves Pending/InProgress. The updater
    /// task folds statuses in asynchronously, so a terminal status is not
    /// observable immediately after the work future resolves.
    async fn wait_until_inactive(state: &AppState, job_key: &str) {
        for _ in 0..200 {
            {
                let jobs = state.jobs.jobs.read().await;
                if let Some(status) = jobs.get(job_key) {
                    if !status.is_active() {
                        return;
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("job {} never reached a terminal status", job_key);
    }

    async fn schedule_noop(state: &AppState, job_key: &str) -> Result<(), String> {
        schedule(state, job_key.to_string(), async {
            Ok(WorkflowSnapshot::default())
        })
        .await
    }

    #[tokio::test]
    async fn active_job_key_refuses_a_second_schedule() {
        let state = app_state();
        let job_key = "calc:UG Programme:Class of 2025:term-1";
        let (release, released) = oneshot::channel::<()>();

        // first invocation holds the key until released
        schedule(&state, job_key.to_string(), async move {
            let _ = released.await;
            Ok(WorkflowSnapshot::default())
        })
        .await
        .unwrap();

        let err = schedule_noop(&state, job_key).await.unwrap_err();
        assert!(err.contains("already in progress"));

        // once the first job reaches a terminal status the key frees up
        release.send(()).unwrap();
        wait_until_inactive(&state, job_key).await;
        schedule_noop(&state, job_key).await.unwrap();
    }

    #[tokio::test]
    async fn failed_job_frees_its_key() {
        let state = app_state();
        let job_key = "document:UG Programme:Class of 2025";

        schedule(&state, job_key.to_string(), async {
            Err("generation failed".to_string())
        })
        .await
        .unwrap();
        wait_until_inactive(&state, job_key).await;

        {
            let jobs = state.jobs.jobs.read().await;
            assert!(matches!(jobs.get(job_key), Some(JobStatus::Failed(_))));
        }
        schedule_noop(&state, job_key).await.unwrap();
    }
}
