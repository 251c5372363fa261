use tracing::{info, instrument};

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, services::Service},
    device_token::ports::DeviceTokenRepository,
    pantry::ports::{PantryItemRepository, PantryUserRepository},
    pantry_scan::{
        entities::ScanResult,
        helpers::{ScanEnvelope, parse_llm_json, sanitize_scan_envelope},
        ports::{LLMClient, PantryScanService},
        schema::get_pantry_scan_schema,
        value_objects::ExtractPantryItemsInput,
    },
    reminder::ports::Notifier,
};

pub fn build_scan_prompt() -> String {
    [
        "You are extracting pantry item data from one food image.",
        "Return STRICT JSON only with this shape:",
        r#"{ "items": [{ "name": string, "category": string, "expiryDateISO": "YYYY-MM-DD", "quantityValue": number|null, "quantityUnit": "pcs|g|kg|ml|l|pack|bottle|can|box|other|null", "quantityNote": string|null, "confidence": number }], "warnings": string[] }"#,
        "Rules:",
        "- Use date format YYYY-MM-DD.",
        "- If unsure, add warning.",
        "- Do not include markdown.",
    ]
    .join("\n")
}

impl<U, I, T, N, LLM> PantryScanService for Service<U, I, T, N, LLM>
where
    U: PantryUserRepository,
    I: PantryItemRepository,
    T: DeviceTokenRepository,
    N: Notifier,
    LLM: LLMClient,
{
    #[instrument(skip(self, input), fields(uid = %identity.id(), image_bytes = input.image_data.len()))]
    async fn extract_pantry_items(
        &self,
        identity: Identity,
        input: ExtractPantryItemsInput,
    ) -> Result<ScanResult, CoreError> {
        if input.image_data.is_empty() {
            return Err(CoreError::Invalid);
        }

        let mime_type = input.mime_type();

        let raw_response = self
            .llm_client
            .generate_with_image(
                build_scan_prompt(),
                input.image_data,
                mime_type,
                get_pantry_scan_schema(),
            )
            .await?;

        let envelope: ScanEnvelope = parse_llm_json(&raw_response)?;
        let received = envelope.items.len();
        let result = sanitize_scan_envelope(envelope);

        info!(
            received,
            kept = result.items.len(),
            warnings = result.warnings.len(),
            "Pantry image scanned"
        );

        Ok(result)
    }
}
