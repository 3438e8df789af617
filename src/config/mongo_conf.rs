use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Collection holding the platform's user profiles
    pub users_collection: String,
    /// Collection holding referral agents
    pub agents_collection: String,
    /// Collection holding dashboard operator accounts
    pub admins_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGO_URI: MongoDB connection URI (required)
    /// - MONGO_DATABASE: Database name (required)
    /// - MONGO_USERS_COLLECTION: Collection name for users (defaults to "users")
    /// - MONGO_AGENTS_COLLECTION: Collection name for agents (defaults to "agents")
    /// - MONGO_ADMINS_COLLECTION: Collection name for admins (defaults to "admins")
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let uri = env::var("MONGO_URI")
            .map_err(|_| {
                error!("MONGO_URI environment variable not found");
                ConfigError::EnvVarNotFound("MONGO_URI".to_string())
            })?;
        debug!("MongoDB URI loaded");

        let database = env::var("MONGO_DATABASE")
            .map_err(|_| {
                error!("MONGO_DATABASE environment variable not found");
                ConfigError::EnvVarNotFound("MONGO_DATABASE".to_string())
            })?;
        debug!("MongoDB database: {}", database);

        let username = env::var("MONGO_USERNAME").ok();
        if let Some(ref user) = username {
            debug!("MongoDB username: {}", user);
        } else {
            debug!("No MongoDB username specified");
        }

        let password = env::var("MONGO_PASSWORD").ok();
        if password.is_some() {
            debug!("MongoDB password provided");
        } else {
            debug!("No MongoDB password specified");
        }

        let users_collection = collection_from_env("MONGO_USERS_COLLECTION", "users");
        let agents_collection = collection_from_env("MONGO_AGENTS_COLLECTION", "agents");
        let admins_collection = collection_from_env("MONGO_ADMINS_COLLECTION", "admins");

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;
        debug!("MongoDB pool size: {}", pool_size);

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("MongoDB connection timeout: {} seconds", connection_timeout_secs);

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            users_collection,
            agents_collection,
            admins_collection,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "test_db".to_string(),
            username: None,
            password: None,
            users_collection: "test_users".to_string(),
            agents_collection: "test_agents".to_string(),
            admins_collection: "test_admins".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        info!("Validating MongoDB configuration");

        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        for (name, value) in [
            ("users", &self.users_collection),
            ("agents", &self.agents_collection),
            ("admins", &self.admins_collection),
        ] {
            if value.is_empty() {
                error!("MongoDB {} collection name is empty", name);
                return Err(ConfigError::ValidationError(format!(
                    "MongoDB {} collection name cannot be empty",
                    name
                )));
            }
        }

        if self.pool_size == 0 {
            error!("MongoDB pool size is 0");
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("MongoDB connection timeout is 0");
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }

        if let Some(ref user) = self.username {
            if user.is_empty() {
                error!("MongoDB username is empty");
                return Err(ConfigError::ValidationError("MongoDB username cannot be empty if set".to_string()));
            }
        }
        if let Some(ref pass) = self.password {
            if pass.is_empty() {
                error!("MongoDB password is empty");
                return Err(ConfigError::ValidationError("MongoDB password cannot be empty if set".to_string()));
            }
        }
        info!("MongoDB configuration validation successful");
        Ok(())
    }
}

fn collection_from_env(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(name) => {
            debug!("{}: {}", var, name);
            name
        }
        Err(_) => {
            debug!("{} not set, using default: {}", var, default);
            default.to_string()
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "matrimony".to_string(),
            username: None,
            password: None,
            users_collection: "users".to_string(),
            agents_collection: "agents".to_string(),
            admins_collection: "admins".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
