use crate::config::mongo_conf::MongoConfig;
use crate::model::agent::Agent;
use crate::repository::mongo;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;
use tracing::{error, info};

#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// All agents ordered by name.
    async fn list(&self) -> RepositoryResult<Vec<Agent>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Agent>>;
    async fn count(&self) -> RepositoryResult<u64>;
}

pub struct MongoAgentRepository {
    collection: mongodb::Collection<Agent>,
}

impl MongoAgentRepository {
    pub fn new(db: &mongodb::Database, config: &MongoConfig) -> Self {
        MongoAgentRepository {
            collection: db.collection::<Agent>(&config.agents_collection),
        }
    }
}

#[async_trait]
impl AgentRepository for MongoAgentRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Agent>> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list agents: {}", e);
            RepositoryError::database(format!("Failed to list agents: {}", e))
        })?;
        let agents = mongo::collect(cursor, "agent").await?;
        info!("Fetched {} agents", agents.len());
        Ok(agents)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Agent>> {
        self.collection
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find agent by id: {}", e)))
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count agents: {}", e)))
    }
}
