use actix_web::{web, Responder};
use common::requests::SaveTemplateRequest;

use crate::services::templates::store::{create_template, update_template};
use crate::AppState;

/// Handler for `POST /api/templates/save`. Creates a template when the
/// payload carries no id; otherwise replaces name and data of the existing
/// one. An unknown id saves nothing (the response body is `null`), matching
/// the store's silent no-op contract.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveTemplateRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let result = match &req.id {
        Some(id) => update_template(state.store.as_ref(), id, &req.name, &req.data),
        None => create_template(state.store.as_ref(), &req.name, &req.data).map(Some),
    };
    match result {
        Ok(saved) => actix_web::HttpResponse::Ok().json(saved),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error saving template: {}", e)),
    }
}
