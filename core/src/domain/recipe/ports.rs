use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    recipe::{entities::RecipeSuggestions, value_objects::GenerateRecipesInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    fn generate_recipes(
        &self,
        identity: Identity,
        input: GenerateRecipesInput,
    ) -> impl Future<Output = Result<RecipeSuggestions, CoreError>> + Send;
}
