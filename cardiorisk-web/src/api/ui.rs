//! UI routes
//!
//! The form page never depends on the model, so it is served even when the
//! artifacts failed to load.

use axum::{response::Html, routing::get, Router};

use crate::render;
use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(serve_form))
}

/// GET /
pub async fn serve_form() -> Html<String> {
    Html(render::render_form())
}
