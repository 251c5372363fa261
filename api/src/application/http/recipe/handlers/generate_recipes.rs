use axum::extract::State;
use pantry_core::domain::recipe::{
    entities::RecipeSuggestions, ports::RecipeService, value_objects::GenerateRecipesInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        recipe::validators::GenerateRecipesRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerateRecipesResponse {
    pub data: RecipeSuggestions,
}

#[utoipa::path(
    post,
    path = "",
    tag = "recipes",
    summary = "Suggest recipes",
    description = "Suggests up to three recipes that prioritize near-expiry pantry items",
    responses(
        (status = 200, body = GenerateRecipesResponse),
        (status = 401, description = "Missing caller identity"),
        (status = 502, description = "The LLM call failed or returned unusable output")
    ),
    params(
        ("x-user-id" = String, Header, description = "Authenticated caller"),
    ),
    request_body = GenerateRecipesRequest
)]
pub async fn generate_recipes(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<GenerateRecipesRequest>,
) -> Result<Response<GenerateRecipesResponse>, ApiError> {
    let result = state
        .service
        .generate_recipes(
            identity,
            GenerateRecipesInput {
                pantry_items: payload.pantry_items,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GenerateRecipesResponse { data: result }))
}
