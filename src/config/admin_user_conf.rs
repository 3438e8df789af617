use std::env;
use serde::{Serialize, Deserialize};
use crate::config::ConfigError;

/// Credentials for the operator account seeded on first start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminUserConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = AdminUserConfig {
            name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
            email: env::var("ADMIN_EMAIL").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_EMAIL".to_string()))?,
            password: env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD".to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.email.contains('@') {
            return Err(ConfigError::InvalidValue(format!("ADMIN_EMAIL is not an email address: {}", self.email)));
        }
        if self.password.len() < 8 {
            return Err(ConfigError::ValidationError("ADMIN_PASSWORD must be at least 8 characters long".to_string()));
        }
        Ok(())
    }
}
