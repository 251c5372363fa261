use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_NOTIFICATION_THRESHOLD_DAYS: u32 = 3;
pub const DEFAULT_PERISHABLE_REMINDER_DAYS: u32 = 7;

/// Per-user reminder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserConfig {
    /// Days ahead within which a dated item counts as expiring soon.
    pub notification_threshold_days: u32,
    /// Age in days after which an undated perishable counts as stale.
    pub perishable_reminder_days: u32,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            notification_threshold_days: DEFAULT_NOTIFICATION_THRESHOLD_DAYS,
            perishable_reminder_days: DEFAULT_PERISHABLE_REMINDER_DAYS,
        }
    }
}

impl UserConfig {
    /// Builds a config from stored values. Missing or negative values fall
    /// back to the defaults.
    pub fn from_raw(
        notification_threshold_days: Option<i64>,
        perishable_reminder_days: Option<i64>,
    ) -> Self {
        let days = |raw: Option<i64>, default: u32| {
            raw.and_then(|value| u32::try_from(value).ok())
                .unwrap_or(default)
        };

        Self {
            notification_threshold_days: days(
                notification_threshold_days,
                DEFAULT_NOTIFICATION_THRESHOLD_DAYS,
            ),
            perishable_reminder_days: days(
                perishable_reminder_days,
                DEFAULT_PERISHABLE_REMINDER_DAYS,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PantryUser {
    pub uid: String,
    pub config: UserConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    Pcs,
    G,
    Kg,
    Ml,
    L,
    Pack,
    Bottle,
    Can,
    Box,
    Other,
}

impl From<&str> for QuantityUnit {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pcs" => QuantityUnit::Pcs,
            "g" => QuantityUnit::G,
            "kg" => QuantityUnit::Kg,
            "ml" => QuantityUnit::Ml,
            "l" => QuantityUnit::L,
            "pack" => QuantityUnit::Pack,
            "bottle" => QuantityUnit::Bottle,
            "can" => QuantityUnit::Can,
            "box" => QuantityUnit::Box,
            _ => QuantityUnit::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PantryItem {
    pub id: Uuid,
    pub uid: String,
    pub name: String,
    pub is_archived: bool,
    /// Calendar date in UTC, no time component.
    pub expiry_date: Option<NaiveDate>,
    pub added_at: Option<DateTime<Utc>>,
    /// No known expiry date, but the item is known to decay.
    pub is_perishable_no_expiry: bool,
}
