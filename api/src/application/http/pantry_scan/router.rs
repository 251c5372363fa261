use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::extract_pantry_items::{__path_extract_pantry_items, extract_pantry_items};
use crate::application::http::server::app_state::AppState;

/// Room for a 10MB image once base64 encoded, plus the JSON envelope.
pub const MAX_SCAN_BODY_SIZE: usize = 14 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(extract_pantry_items))]
pub struct PantryScanApiDoc;

pub fn pantry_scan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/pantry/scan", state.args.server.root_path),
            post(extract_pantry_items),
        )
        .layer(DefaultBodyLimit::max(MAX_SCAN_BODY_SIZE))
}
