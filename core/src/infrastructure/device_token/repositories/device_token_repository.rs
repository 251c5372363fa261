use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        device_token::{entities::DeviceToken, ports::DeviceTokenRepository},
    },
    entity::device_tokens::{Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresDeviceTokenRepository {
    pub db: DatabaseConnection,
}

impl PostgresDeviceTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DeviceTokenRepository for PostgresDeviceTokenRepository {
    async fn fetch_device_tokens(&self, uid: &str) -> Result<Vec<String>, CoreError> {
        let tokens = Entity::find()
            .filter(Column::Uid.eq(uid))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch device tokens: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(DeviceToken::from)
            .filter(DeviceToken::is_usable)
            .map(|device_token| device_token.token)
            .collect::<Vec<String>>();

        Ok(tokens)
    }
}
