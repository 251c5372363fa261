pub mod entities;
pub mod ports;

pub use entities::DeviceToken;
pub use ports::DeviceTokenRepository;
