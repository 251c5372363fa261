pub mod db;
pub mod device_token;
pub mod llm;
pub mod messaging;
pub mod pantry;
