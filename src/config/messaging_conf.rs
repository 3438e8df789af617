use std::env;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Outbound chat link settings used when notifying a user about a
/// verification change. Links are only generated, never sent.
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// Base URL of the chat service, e.g. `https://wa.me`
    pub base_url: String,
    /// Pre-filled text sent after an account is verified
    pub verified_text: String,
    /// Pre-filled text sent after an account is restricted
    pub restricted_text: String,
}

impl MessagingConfig {
    /// Load messaging configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - MESSAGING_BASE_URL
    /// - MESSAGING_VERIFIED_TEXT
    /// - MESSAGING_RESTRICTED_TEXT
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading messaging configuration from environment variables");
        let defaults = MessagingConfig::default();

        let base_url = env::var("MESSAGING_BASE_URL").unwrap_or(defaults.base_url);
        debug!("Messaging base URL: {}", base_url);
        let verified_text = env::var("MESSAGING_VERIFIED_TEXT").unwrap_or(defaults.verified_text);
        let restricted_text = env::var("MESSAGING_RESTRICTED_TEXT").unwrap_or(defaults.restricted_text);

        let config = MessagingConfig { base_url, verified_text, restricted_text };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            error!("Messaging base URL must be http(s): {}", self.base_url);
            return Err(ConfigError::InvalidValue(format!(
                "MESSAGING_BASE_URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.verified_text.trim().is_empty() || self.restricted_text.trim().is_empty() {
            error!("Messaging texts cannot be empty");
            return Err(ConfigError::ValidationError("Messaging texts cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        MessagingConfig {
            base_url: "https://wa.me".to_string(),
            verified_text: "You can access the account now. It has been verified by admin.".to_string(),
            restricted_text: "Your access has been restricted by the admin due to reports by other users.".to_string(),
        }
    }
}
