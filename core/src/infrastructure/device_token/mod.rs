pub mod mappers;
pub mod repositories;

pub use repositories::device_token_repository::PostgresDeviceTokenRepository;
