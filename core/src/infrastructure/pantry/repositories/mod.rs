pub mod pantry_item_repository;
pub mod pantry_user_repository;

pub use pantry_item_repository::PostgresPantryItemRepository;
pub use pantry_user_repository::PostgresPantryUserRepository;
