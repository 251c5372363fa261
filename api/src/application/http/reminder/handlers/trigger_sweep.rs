use axum::extract::State;
use chrono::Utc;
use pantry_core::domain::reminder::{entities::SweepResult, ports::ReminderService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriggerSweepResponse {
    pub data: SweepResult,
}

#[utoipa::path(
    post,
    path = "/sweep",
    tag = "reminders",
    summary = "Run the reminder sweep for the caller",
    description = "Evaluates the caller's pantry now and sends a reminder if one is due. Only allow-listed callers may use it.",
    responses(
        (status = 200, body = TriggerSweepResponse),
        (status = 401, description = "Missing caller identity"),
        (status = 403, description = "Caller is not allowed to trigger a sweep")
    ),
    params(
        ("x-user-id" = String, Header, description = "Authenticated caller"),
    ),
)]
pub async fn trigger_sweep(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<TriggerSweepResponse>, ApiError> {
    let result = state
        .service
        .run_debug_sweep(identity, Utc::now())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(TriggerSweepResponse { data: result }))
}
