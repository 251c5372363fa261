use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceToken {
    pub id: Uuid,
    pub uid: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl DeviceToken {
    pub fn is_usable(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
