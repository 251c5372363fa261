use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, services::Service},
    device_token::ports::DeviceTokenRepository,
    pantry::ports::{PantryItemRepository, PantryUserRepository},
    pantry_scan::{
        helpers::{lenient, parse_llm_json, stringify_value},
        ports::LLMClient,
    },
    recipe::{
        entities::{Recipe, RecipeSuggestions, UNTITLED_RECIPE},
        ports::RecipeService,
        schema::get_recipe_schema,
        value_objects::GenerateRecipesInput,
    },
    reminder::ports::Notifier,
};

pub const MAX_RECIPES: usize = 3;

#[derive(Debug, Deserialize)]
struct RecipeEnvelope {
    #[serde(default)]
    recipes: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawRecipe {
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    ingredients: Vec<serde_json::Value>,
    #[serde(deserialize_with = "lenient")]
    steps: Vec<serde_json::Value>,
    #[serde(deserialize_with = "lenient")]
    rationale: Option<String>,
    #[serde(deserialize_with = "lenient")]
    uses_expiring: Vec<serde_json::Value>,
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        let texts = |values: Vec<serde_json::Value>| -> Vec<String> {
            values.iter().map(stringify_value).collect()
        };

        Self {
            title: raw.title.unwrap_or_else(|| UNTITLED_RECIPE.to_string()),
            ingredients: texts(raw.ingredients),
            steps: texts(raw.steps),
            rationale: raw.rationale.unwrap_or_default(),
            uses_expiring: texts(raw.uses_expiring),
        }
    }
}

fn decode_recipe(value: serde_json::Value) -> Option<Recipe> {
    serde_json::from_value::<RawRecipe>(value)
        .inspect_err(|e| debug!("Dropping undecodable recipe: {}", e))
        .ok()
        .map(Recipe::from)
}

pub fn build_recipe_prompt(pantry_items_json: &str) -> String {
    [
        "You are a cooking assistant.".to_string(),
        format!(
            "Given pantry items JSON, suggest up to {} recipes prioritizing near-expiry ingredients.",
            MAX_RECIPES
        ),
        "Return STRICT JSON only in this format:".to_string(),
        r#"{ "recipes": [{ "title": string, "ingredients": string[], "steps": string[], "rationale": string, "usesExpiring": string[] }] }"#.to_string(),
        format!("Pantry items: {}", pantry_items_json),
        "Do not include markdown.".to_string(),
    ]
    .join("\n")
}

impl<U, I, T, N, LLM> RecipeService for Service<U, I, T, N, LLM>
where
    U: PantryUserRepository,
    I: PantryItemRepository,
    T: DeviceTokenRepository,
    N: Notifier,
    LLM: LLMClient,
{
    #[instrument(skip(self, input), fields(uid = %identity.id(), pantry_items = input.pantry_items.len()))]
    async fn generate_recipes(
        &self,
        identity: Identity,
        input: GenerateRecipesInput,
    ) -> Result<RecipeSuggestions, CoreError> {
        if input.pantry_items.is_empty() {
            return Err(CoreError::Invalid);
        }

        let pantry_items_json = serde_json::to_string(&input.pantry_items).map_err(|e| {
            error!("Failed to serialize pantry items: {}", e);
            CoreError::InternalServerError
        })?;

        let raw_response = self
            .llm_client
            .generate_with_text(build_recipe_prompt(&pantry_items_json), get_recipe_schema())
            .await?;

        let envelope: RecipeEnvelope = parse_llm_json(&raw_response)?;
        let recipes: Vec<Recipe> = envelope
            .recipes
            .into_iter()
            .filter_map(decode_recipe)
            .take(MAX_RECIPES)
            .collect();

        info!(recipes = recipes.len(), "Recipes generated");

        Ok(RecipeSuggestions { recipes })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        common::policies::PantryPolicy,
        device_token::ports::MockDeviceTokenRepository,
        pantry::ports::{MockPantryItemRepository, MockPantryUserRepository},
        pantry_scan::ports::MockLLMClient,
        reminder::ports::MockNotifier,
    };

    fn service_with(
        llm_client: MockLLMClient,
    ) -> Service<
        MockPantryUserRepository,
        MockPantryItemRepository,
        MockDeviceTokenRepository,
        MockNotifier,
        MockLLMClient,
    > {
        Service::new(
            MockPantryUserRepository::new(),
            MockPantryItemRepository::new(),
            MockDeviceTokenRepository::new(),
            MockNotifier::new(),
            llm_client,
            PantryPolicy::default(),
        )
    }

    #[test]
    fn test_raw_recipe_defaults() {
        let recipe = decode_recipe(json!({ "ingredients": ["eggs", 2] })).unwrap();
        assert_eq!(recipe.title, "Untitled Recipe");
        assert_eq!(recipe.ingredients, vec!["eggs", "2"]);
        assert!(recipe.steps.is_empty());
        assert_eq!(recipe.rationale, "");
    }

    #[test]
    fn test_raw_recipe_mistyped_fields_fall_back() {
        let recipe = decode_recipe(json!({
            "title": 12,
            "ingredients": ["eggs", 2],
            "steps": "whisk and fry",
            "rationale": ["uses eggs"],
            "usesExpiring": "milk"
        }))
        .unwrap();

        assert_eq!(recipe.title, "Untitled Recipe");
        assert_eq!(recipe.ingredients, vec!["eggs", "2"]);
        assert!(recipe.steps.is_empty());
        assert_eq!(recipe.rationale, "");
        assert!(recipe.uses_expiring.is_empty());

        assert_eq!(decode_recipe(json!("Omelette")), None);
    }

    #[test]
    fn test_prompt_embeds_pantry_items() {
        let prompt = build_recipe_prompt(r#"[{"name":"Milk"}]"#);
        assert!(prompt.contains(r#"Pantry items: [{"name":"Milk"}]"#));
        assert!(prompt.contains("up to 3 recipes"));
    }

    #[tokio::test]
    async fn test_generate_requires_pantry_items() {
        let service = service_with(MockLLMClient::new());

        let result = service
            .generate_recipes(
                Identity::new("user-1"),
                GenerateRecipesInput {
                    pantry_items: vec![],
                },
            )
            .await;

        assert_eq!(result, Err(CoreError::Invalid));
    }

    #[tokio::test]
    async fn test_generate_caps_recipe_count() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt, _| prompt.contains("Milk"))
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(json!({
                        "recipes": [
                            { "title": "Pancakes", "ingredients": ["milk"], "steps": ["mix"], "rationale": "uses milk", "usesExpiring": ["Milk"] },
                            { "title": "Omelette" },
                            { "title": "Custard" },
                            { "title": "Latte" }
                        ]
                    })
                    .to_string())
                })
            });

        let service = service_with(llm);

        let result = service
            .generate_recipes(
                Identity::new("user-1"),
                GenerateRecipesInput {
                    pantry_items: vec![json!({ "name": "Milk", "expiryDateISO": "2024-06-12" })],
                },
            )
            .await
            .unwrap();

        assert_eq!(result.recipes.len(), 3);
        assert_eq!(result.recipes[0].uses_expiring, vec!["Milk"]);
        assert_eq!(result.recipes[2].title, "Custard");
    }
}
