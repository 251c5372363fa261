use serde_json::json;

/// Returns the JSON schema for recipe suggestion LLM responses
pub fn get_recipe_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "recipes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "ingredients": { "type": "array", "items": { "type": "string" } },
                        "steps": { "type": "array", "items": { "type": "string" } },
                        "rationale": { "type": "string" },
                        "usesExpiring": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["title", "ingredients", "steps", "rationale", "usesExpiring"]
                }
            }
        },
        "required": ["recipes"]
    })
}
