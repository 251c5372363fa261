use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractPantryItemsRequest {
    /// Base64 encoded image bytes.
    #[validate(custom(function = "not_blank", message = "imageBase64 is required"))]
    pub image_base64: String,
    #[schema(example = "image/jpeg")]
    pub mime_type: Option<String>,
}
