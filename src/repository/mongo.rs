use futures::stream::StreamExt;
use mongodb::{
    options::{ClientOptions, Credential, ResolverConfig},
    Client, Cursor, Database,
};
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Open a pooled client and return the configured database. One client is
/// shared by every repository.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("MatrimonyAdmin".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }
    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client configured");
    Ok(client.database(&config.database))
}

/// Drain a cursor. A document that fails to decode fails the whole read.
pub async fn collect<T>(mut cursor: Cursor<T>, what: &str) -> RepositoryResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut items = Vec::new();
    while let Some(item) = cursor.next().await {
        match item {
            Ok(doc) => items.push(doc),
            Err(e) => {
                error!("Failed to deserialize {}: {}", what, e);
                return Err(RepositoryError::serialization(format!(
                    "Failed to deserialize {}: {}",
                    what, e
                )));
            }
        }
    }
    Ok(items)
}
