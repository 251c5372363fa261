pub mod authentication;
pub mod common;
pub mod device_token;
pub mod pantry;
pub mod pantry_scan;
pub mod recipe;
pub mod reminder;
