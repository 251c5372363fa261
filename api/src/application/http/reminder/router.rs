use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::trigger_sweep::{__path_trigger_sweep, trigger_sweep};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(trigger_sweep))]
pub struct ReminderApiDoc;

pub fn reminder_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/reminders/sweep", state.args.server.root_path),
        post(trigger_sweep),
    )
}
