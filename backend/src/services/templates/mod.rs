//! # Template Service Module
//!
//! Aggregates the API endpoints for managing saved template designs. It acts
//! as a router, directing requests under `/api/templates` to the handler
//! logic in its sub-modules.
//!
//! ## Sub-modules:
//! - `store`: persistence of the template list and the cohort-exclusivity
//!   rule (shared with the workflow simulator's gating logic).
//! - `list`: returns all saved templates.
//! - `get`: returns one template by id, plus the seed document for a new
//!   design.
//! - `save`: creates a new template or updates an existing one.
//! - `meta`: merges program/cohort/type mapping metadata into a template.

pub mod store;

mod get;
mod list;
mod meta;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: all templates as JSON (`list::process`).
/// *   **`GET /seed`**: the canonical default document a new design starts
///     from (`get::seed`).
/// *   **`POST /save`**: create-or-update. The payload carries an optional
///     template id, a name, and the document; absence of the id means create
///     (`save::process`).
/// *   **`POST /meta/{template_id}`**: merge mapping metadata; setting
///     cohorts strips them from all other templates (`meta::process`).
/// *   **`GET /{template_id}`**: one template by id (`get::process`).
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/seed", get().to(get::seed))
        .route("/save", post().to(save::process))
        .route("/meta/{template_id}", post().to(meta::process))
        .route("/{template_id}", get().to(get::process))
}
