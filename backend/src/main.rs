mod job_controller;
mod services;
mod storage;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use tokio::sync::{mpsc, RwLock};

use crate::job_controller::state::JobsState;
use crate::services::workflow::scoring::{
    DocumentGenerator, MockDocumentGenerator, MockScoringService, ScoringService,
};
use crate::storage::{BlobStore, SqliteStore};

const DB_PATH: &str = "transcript_designer.sqlite";

/// Shared application state: the persistence port, the background-job map,
/// and the simulated computation services. All fields are `Arc`-backed so
/// the state clones cheaply into each worker.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlobStore>,
    pub jobs: JobsState,
    pub scoring: Arc<dyn ScoringService>,
    pub generator: Arc<dyn DocumentGenerator>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let host = "127.0.0.1";
    let port = 8080;

    let store = SqliteStore::open(DB_PATH)
        .map_err(|e| std::io::Error::other(format!("failed to open {}: {}", DB_PATH, e)))?;

    // Initialize job controller state
    let (tx, rx) = mpsc::channel(100);
    let jobs_state = JobsState {
        jobs: Arc::new(RwLock::new(HashMap::new())),
        tx,
    };

    // Start job updater task
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    let app_state = AppState {
        store: Arc::new(store),
        jobs: jobs_state,
        scoring: Arc::new(MockScoringService {
            delay: Duration::from_millis(1500),
        }),
        generator: Arc::new(MockDocumentGenerator {
            delay: Duration::from_millis(2000),
        }),
    };

    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB, logo images arrive as base64
            .app_data(web::Data::new(app_state.clone()))
            .service(services::templates::configure_routes())
            .service(services::editor::configure_routes())
            .service(services::preview::configure_routes())
            .service(services::workflow::configure_routes())
    })
    .bind((host, port))?
    .run()
    .await
}
