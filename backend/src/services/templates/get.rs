use actix_web::{web, Responder};
use common::defaults::seed_document;

use crate::services::templates::store::{find_template, load_templates};
use crate::AppState;

/// Handler for `GET /api/templates/{template_id}`.
pub async fn process(state: web::Data<AppState>, template_id: web::Path<String>) -> impl Responder {
    let templates = load_templates(state.store.as_ref());
    match find_template(&templates, &template_id) {
        Some(template) => actix_web::HttpResponse::Ok().json(template),
        None => actix_web::HttpResponse::NotFound().body("Template not found"),
    }
}

/// Handler for `GET /api/templates/seed`: the document a new design starts
/// from.
pub async fn seed() -> impl Responder {
    actix_web::HttpResponse::Ok().json(seed_document())
}
