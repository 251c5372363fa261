use crate::{domain::device_token::entities::DeviceToken, entity::device_tokens};

impl From<&device_tokens::Model> for DeviceToken {
    fn from(model: &device_tokens::Model) -> Self {
        Self {
            id: model.id,
            uid: model.uid.clone(),
            token: model.token.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<device_tokens::Model> for DeviceToken {
    fn from(model: device_tokens::Model) -> Self {
        Self::from(&model)
    }
}
