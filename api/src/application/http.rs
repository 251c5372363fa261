pub mod health;
pub mod pantry_scan;
pub mod recipe;
pub mod reminder;
pub mod server;
