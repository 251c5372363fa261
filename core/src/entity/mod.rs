pub mod device_tokens;
pub mod pantry_items;
pub mod pantry_users;
