#[derive(Debug, Clone)]
pub struct GenerateRecipesInput {
    /// Pantry items as sent by the client, forwarded to the model verbatim.
    pub pantry_items: Vec<serde_json::Value>,
}
