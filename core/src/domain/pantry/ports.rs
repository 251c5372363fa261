use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    pantry::entities::{PantryItem, PantryUser},
};

/// Read access to the users known to the reminder sweep.
#[cfg_attr(test, mockall::automock)]
pub trait PantryUserRepository: Send + Sync {
    fn list_users(&self) -> impl Future<Output = Result<Vec<PantryUser>, CoreError>> + Send;

    fn get_user(
        &self,
        uid: &str,
    ) -> impl Future<Output = Result<Option<PantryUser>, CoreError>> + Send;
}

/// Read access to a user's inventory.
#[cfg_attr(test, mockall::automock)]
pub trait PantryItemRepository: Send + Sync {
    fn fetch_non_archived_items(
        &self,
        uid: &str,
    ) -> impl Future<Output = Result<Vec<PantryItem>, CoreError>> + Send;
}
