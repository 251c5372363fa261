pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct ExtractPantryItemsInput {
    pub image_data: Vec<u8>,
    pub mime_type: Option<String>,
}

impl ExtractPantryItemsInput {
    pub fn mime_type(&self) -> String {
        self.mime_type
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
            .to_string()
    }
}
