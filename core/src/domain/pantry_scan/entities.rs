use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::pantry::entities::QuantityUnit;

/// A pantry item recognised on a photo, after sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectedItem {
    pub name: String,
    pub category: String,
    #[serde(rename = "expiryDateISO")]
    pub expiry_date_iso: NaiveDate,
    pub quantity_value: Option<f64>,
    pub quantity_unit: Option<QuantityUnit>,
    pub quantity_note: Option<String>,
    /// Model confidence clamped to `[0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScanResult {
    pub items: Vec<DetectedItem>,
    pub warnings: Vec<String>,
}
