use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::response::Response;

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LiveResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness check",
    responses(
        (status = 200, body = LiveResponse)
    ),
)]
pub async fn live() -> Response<LiveResponse> {
    Response::OK(LiveResponse {
        status: "ok".to_string(),
    })
}
