pub mod device_token_repository;
