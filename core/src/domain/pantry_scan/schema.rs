use serde_json::json;

/// Returns the JSON schema for pantry scan LLM responses
pub fn get_pantry_scan_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "category": { "type": "string" },
                        "expiryDateISO": { "type": "string" },
                        "quantityValue": { "type": "number", "nullable": true },
                        "quantityUnit": {
                            "type": "string",
                            "nullable": true,
                            "enum": ["pcs", "g", "kg", "ml", "l", "pack", "bottle", "can", "box", "other"]
                        },
                        "quantityNote": { "type": "string", "nullable": true },
                        "confidence": { "type": "number" }
                    },
                    "required": ["name", "category", "expiryDateISO", "confidence"]
                }
            },
            "warnings": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["items", "warnings"]
    })
}
