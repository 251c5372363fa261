use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipesRequest {
    /// Pantry items as stored by the client, forwarded to the model as JSON.
    #[validate(length(
        min = 1,
        max = 200,
        message = "pantryItems must contain between 1 and 200 items"
    ))]
    #[schema(value_type = Vec<Object>)]
    pub pantry_items: Vec<serde_json::Value>,
}
