use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    pantry_scan::{entities::ScanResult, value_objects::ExtractPantryItemsInput},
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PantryScanService: Send + Sync {
    fn extract_pantry_items(
        &self,
        identity: Identity,
        input: ExtractPantryItemsInput,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;
}
