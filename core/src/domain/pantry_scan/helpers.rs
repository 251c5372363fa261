use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::{debug, error};

use crate::domain::{
    common::entities::app_errors::CoreError,
    pantry::entities::QuantityUnit,
    pantry_scan::entities::{DetectedItem, ScanResult},
};

const DEFAULT_CATEGORY: &str = "Other";

static CODE_FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^```(?:json)?\s*").expect("valid code fence regex"));
static CODE_FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid code fence regex"));

/// Removes a Markdown code fence the model may wrap its JSON in.
pub fn strip_code_fence(input: &str) -> &str {
    let trimmed = input.trim();
    let start = CODE_FENCE_OPEN
        .find(trimmed)
        .map(|m| m.end())
        .unwrap_or(0);
    let rest = &trimmed[start..];
    let end = CODE_FENCE_CLOSE
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());

    rest[..end].trim()
}

/// Decodes a model reply into `T`, tolerating a surrounding code fence.
pub fn parse_llm_json<T: DeserializeOwned>(text: &str) -> Result<T, CoreError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        error!("Failed to parse LLM response: {}", e);
        CoreError::ExternalServiceError(format!("LLM JSON parse failed: {}", e))
    })
}

/// Renders a JSON value as plain text: strings verbatim, anything else as JSON.
pub fn stringify_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a UTC calendar date.
pub fn to_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

#[derive(Debug, Deserialize)]
pub struct ScanEnvelope {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub warnings: Vec<serde_json::Value>,
}

/// Field-level `deserialize_with` for model output: a value of the wrong
/// JSON type becomes the field's default instead of failing the record.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(serde_json::from_value(value)
        .inspect_err(|e| debug!("Defaulting mistyped field: {}", e))
        .unwrap_or_default())
}

/// Numbers sometimes come back quoted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn finite(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };

        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawDetectedItem {
    #[serde(deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    category: Option<String>,
    #[serde(rename = "expiryDateISO", deserialize_with = "lenient")]
    expiry_date_iso: Option<String>,
    #[serde(deserialize_with = "lenient")]
    quantity_value: Option<LooseNumber>,
    #[serde(deserialize_with = "lenient")]
    quantity_unit: Option<String>,
    #[serde(deserialize_with = "lenient")]
    quantity_note: Option<String>,
    #[serde(deserialize_with = "lenient")]
    confidence: Option<LooseNumber>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates one raw item. Returns `None` when the item is not an object or
/// has no string name or usable expiry date. Other mistyped fields fall back
/// to their defaults.
pub fn sanitize_detected_item(raw: serde_json::Value) -> Option<DetectedItem> {
    let item: RawDetectedItem = serde_json::from_value(raw)
        .inspect_err(|e| debug!("Dropping undecodable detected item: {}", e))
        .ok()?;

    let name = non_blank(item.name)?;
    let expiry_date_iso = item.expiry_date_iso.as_deref().and_then(to_iso_date)?;

    Some(DetectedItem {
        name,
        category: non_blank(item.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        expiry_date_iso,
        quantity_value: item.quantity_value.as_ref().and_then(LooseNumber::finite),
        quantity_unit: non_blank(item.quantity_unit).map(|unit| QuantityUnit::from(unit.as_str())),
        quantity_note: non_blank(item.quantity_note),
        confidence: item
            .confidence
            .as_ref()
            .and_then(LooseNumber::finite)
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(0.0),
    })
}

pub fn sanitize_scan_envelope(envelope: ScanEnvelope) -> ScanResult {
    ScanResult {
        items: envelope
            .items
            .into_iter()
            .filter_map(sanitize_detected_item)
            .collect(),
        warnings: envelope.warnings.iter().map(stringify_value).collect(),
    }
}
