//! Browser UI for aidet-server
//!
//! Single self-contained HTML page (vanilla ES6+, no frameworks)
//! embedded at build time. The page posts each selected file to
//! /api/detect independently and renders the verdict inline.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(index_page))
}

/// Root page - drag-and-drop detector UI
async fn index_page() -> impl IntoResponse {
    Html(include_str!("detector_ui.html"))
}
