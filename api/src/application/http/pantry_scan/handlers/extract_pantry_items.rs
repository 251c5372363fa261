use axum::extract::State;
use base64::{Engine, engine::general_purpose};
use pantry_core::domain::pantry_scan::{
    entities::ScanResult, ports::PantryScanService, value_objects::ExtractPantryItemsInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        pantry_scan::validators::ExtractPantryItemsRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExtractPantryItemsResponse {
    pub data: ScanResult,
}

pub fn decode_image(image_base64: &str) -> Result<Vec<u8>, ApiError> {
    let compact: String = image_base64
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let image_data = general_purpose::STANDARD
        .decode(compact)
        .map_err(|_| ApiError::BadRequest("imageBase64 is not valid base64".to_string()))?;

    if image_data.len() > MAX_IMAGE_SIZE {
        return Err(ApiError::BadRequest(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        )));
    }

    Ok(image_data)
}

#[utoipa::path(
    post,
    path = "/scan",
    tag = "pantry",
    summary = "Extract pantry items from a photo",
    description = "Detects food items and their expiry dates in one image using the LLM",
    responses(
        (status = 200, body = ExtractPantryItemsResponse),
        (status = 401, description = "Missing caller identity"),
        (status = 502, description = "The LLM call failed or returned unusable output")
    ),
    params(
        ("x-user-id" = String, Header, description = "Authenticated caller"),
    ),
    request_body = ExtractPantryItemsRequest
)]
pub async fn extract_pantry_items(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<ExtractPantryItemsRequest>,
) -> Result<Response<ExtractPantryItemsResponse>, ApiError> {
    let image_data = decode_image(&payload.image_base64)?;

    let result = state
        .service
        .extract_pantry_items(
            identity,
            ExtractPantryItemsInput {
                image_data,
                mime_type: payload.mime_type,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ExtractPantryItemsResponse { data: result }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_image_ignores_line_breaks() {
        assert_eq!(decode_image("AQ\nID").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        assert!(matches!(
            decode_image("not base64!"),
            Err(ApiError::BadRequest(_))
        ));
    }
}
