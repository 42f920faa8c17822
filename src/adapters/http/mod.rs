pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use crate::adapters::http::state::HttpState;

pub fn router(state: HttpState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/session", get(routes::get_session))
        .route(
            "/api/file",
            post(routes::select_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/upload", post(routes::start_upload))
        .route("/api/notice/ack", post(routes::acknowledge_notice))
        .route("/api/preview/:id", get(routes::get_preview))
        .route("/api/overlay.png", get(routes::get_overlay))
        .with_state(state)
}
