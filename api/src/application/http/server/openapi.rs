use utoipa::OpenApi;

use crate::application::http::{
    health::router::HealthApiDoc, pantry_scan::router::PantryScanApiDoc,
    recipe::router::RecipeApiDoc, reminder::router::ReminderApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pantry API"
    ),
    nest(
        (path = "/health", api = HealthApiDoc),
        (path = "/pantry", api = PantryScanApiDoc),
        (path = "/recipes", api = RecipeApiDoc),
        (path = "/reminders", api = ReminderApiDoc),
    )
)]
pub struct ApiDoc;
