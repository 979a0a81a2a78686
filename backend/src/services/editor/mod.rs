//! Editor service: applies one mutation to a document.
//!
//! The designer surface posts the current document together with an `EditOp`
//! message; the response is the new document value. The input document is
//! migrated first, so stale clients holding pre-migration shapes converge on
//! the current schema. All actual mutation logic is the pure layer in
//! `common::editor`.

use actix_web::web::{post, scope};
use actix_web::{web, Responder, Scope};
use common::editor;
use common::migrate::migrate_document;
use common::requests::ApplyEditRequest;

const API_PATH: &str = "/api/editor";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/apply", post().to(process))
}

/// Handler for `POST /api/editor/apply`.
pub async fn process(payload: web::Json<ApplyEditRequest>) -> impl Responder {
    let req = payload.into_inner();
    let document = migrate_document(&req.document);
    actix_web::HttpResponse::Ok().json(editor::apply(&document, &req.op))
}
