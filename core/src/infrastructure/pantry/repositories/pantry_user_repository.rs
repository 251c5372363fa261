use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        pantry::{entities::PantryUser, ports::PantryUserRepository},
    },
    entity::pantry_users::{Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresPantryUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresPantryUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PantryUserRepository for PostgresPantryUserRepository {
    async fn list_users(&self) -> Result<Vec<PantryUser>, CoreError> {
        let users = Entity::find()
            .order_by_asc(Column::Uid)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list pantry users: {}", e);
                CoreError::InternalServerError
            })?
            .iter()
            .map(PantryUser::from)
            .collect::<Vec<PantryUser>>();

        Ok(users)
    }

    async fn get_user(&self, uid: &str) -> Result<Option<PantryUser>, CoreError> {
        let user = Entity::find_by_id(uid.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get pantry user: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(user.map(PantryUser::from))
    }
}
