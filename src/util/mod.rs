pub mod error;
pub mod jwt;
pub mod logger;
pub mod messaging;
pub mod password;
