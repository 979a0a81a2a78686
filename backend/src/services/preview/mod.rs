//! Preview service: projects a document to its laid-out page.

pub mod render;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/preview";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(render::process))
}
