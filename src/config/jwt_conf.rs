use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// JWT configuration for operator sessions
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Access token expiration time in minutes
    pub access_token_expiration: i64,
    /// Refresh token expiration time in minutes
    pub refresh_token_expiration: i64,
    /// JWT issuer (optional)
    pub jwt_issuer: Option<String>,
    /// JWT audience (optional)
    pub jwt_audience: Option<String>,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required, at least 32 chars)
    /// - JWT_ACCESS_TOKEN_EXPIRY: Access token expiration in minutes (defaults to 15)
    /// - JWT_REFRESH_TOKEN_EXPIRY: Refresh token expiration in minutes (defaults to 10080 = 1 week)
    /// - JWT_ISSUER: JWT issuer (optional)
    /// - JWT_AUDIENCE: JWT audience (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            error!("JWT_SECRET environment variable not found");
            ConfigError::EnvVarNotFound("JWT_SECRET".to_string())
        })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let access_token_expiration = parse_minutes("JWT_ACCESS_TOKEN_EXPIRY", "15")?;
        debug!("JWT access token expiration: {} minutes", access_token_expiration);

        let refresh_token_expiration = parse_minutes("JWT_REFRESH_TOKEN_EXPIRY", "10080")?;
        debug!("JWT refresh token expiration: {} minutes", refresh_token_expiration);

        let jwt_issuer = env::var("JWT_ISSUER").ok();
        let jwt_audience = env::var("JWT_AUDIENCE").ok();

        let config = JwtConfig {
            jwt_secret,
            access_token_expiration,
            refresh_token_expiration,
            jwt_issuer,
            jwt_audience,
        };

        config.validate()?;
        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating JWT configuration");

        if self.jwt_secret.len() < 32 {
            error!("JWT secret is too short (minimum 32 characters required)");
            return Err(ConfigError::ValidationError(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.access_token_expiration <= 0 {
            error!("Access token expiration must be greater than 0");
            return Err(ConfigError::ValidationError(
                "Access token expiration must be greater than 0".to_string(),
            ));
        }

        if self.refresh_token_expiration <= 0 {
            error!("Refresh token expiration must be greater than 0");
            return Err(ConfigError::ValidationError(
                "Refresh token expiration must be greater than 0".to_string(),
            ));
        }

        if self.access_token_expiration >= self.refresh_token_expiration {
            warn!("Access token expiration is greater than or equal to refresh token expiration");
        }

        debug!("JWT configuration validation passed");
        Ok(())
    }
}

fn parse_minutes(var: &str, default: &str) -> Result<i64, ConfigError> {
    env::var(var)
        .unwrap_or_else(|_| {
            warn!("{} not set, using default: {} minutes", var, default);
            default.to_string()
        })
        .parse::<i64>()
        .map_err(|e| {
            error!("Invalid {} value: {}", var, e);
            ConfigError::ParseError(format!("{}: {}", var, e))
        })
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "local_development_secret_that_is_long_enough_for_hs256".to_string(),
            access_token_expiration: 15,
            refresh_token_expiration: 10080,
            jwt_issuer: Some("matrimony-admin".to_string()),
            jwt_audience: Some("matrimony-admin-dashboard".to_string()),
        }
    }
}
