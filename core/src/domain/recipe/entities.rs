use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub rationale: String,
    /// Pantry items close to expiry that the recipe uses up.
    pub uses_expiring: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSuggestions {
    pub recipes: Vec<Recipe>,
}
