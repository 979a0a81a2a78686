use actix_web::{web, Responder};

use crate::services::templates::store::load_templates;
use crate::AppState;

pub async fn process(state: web::Data<AppState>) -> impl Responder {
    let templates = load_templates(state.store.as_ref());
    actix_web::HttpResponse::Ok().json(templates)
}
