use crate::{
    domain::pantry::entities::{PantryItem, PantryUser, UserConfig},
    entity::{pantry_items, pantry_users},
};

impl From<&pantry_users::Model> for PantryUser {
    fn from(model: &pantry_users::Model) -> Self {
        Self {
            uid: model.uid.clone(),
            config: UserConfig::from_raw(
                model.notification_threshold_days.map(i64::from),
                model.perishable_reminder_days.map(i64::from),
            ),
        }
    }
}

impl From<pantry_users::Model> for PantryUser {
    fn from(model: pantry_users::Model) -> Self {
        Self::from(&model)
    }
}

impl From<pantry_items::Model> for PantryItem {
    fn from(model: pantry_items::Model) -> Self {
        Self {
            id: model.id,
            uid: model.uid,
            name: model.name,
            is_archived: model.is_archived,
            expiry_date: model.expiry_date,
            added_at: model.added_at.map(|dt| dt.to_utc()),
            is_perishable_no_expiry: model.is_perishable_no_expiry,
        }
    }
}
