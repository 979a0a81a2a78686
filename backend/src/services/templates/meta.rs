use actix_web::{web, Responder};
use common::model::template::TemplateMetaPatch;

use crate::services::templates::store::patch_template_meta;
use crate::AppState;

/// Handler for `POST /api/templates/meta/{template_id}`. Merges mapping
/// metadata (programs, cohorts, types) into the template; setting cohorts
/// strips the claimed values from every other template.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
    payload: web::Json<TemplateMetaPatch>,
) -> impl Responder {
    match patch_template_meta(state.store.as_ref(), &template_id, &payload) {
        Ok(patched) => actix_web::HttpResponse::Ok().json(patched),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error updating template mapping: {}", e)),
    }
}
