use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        pantry::{entities::PantryItem, ports::PantryItemRepository},
    },
    entity::pantry_items::{Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresPantryItemRepository {
    pub db: DatabaseConnection,
}

impl PostgresPantryItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PantryItemRepository for PostgresPantryItemRepository {
    async fn fetch_non_archived_items(&self, uid: &str) -> Result<Vec<PantryItem>, CoreError> {
        // Soonest expiry first so the first names in a reminder are the most urgent.
        let items = Entity::find()
            .filter(Column::Uid.eq(uid))
            .filter(Column::IsArchived.eq(false))
            .order_by_asc(Column::ExpiryDate)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch pantry items: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(PantryItem::from)
            .collect::<Vec<PantryItem>>();

        Ok(items)
    }
}
