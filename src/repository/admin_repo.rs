use crate::config::mongo_conf::MongoConfig;
use crate::model::admin::Admin;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use tracing::{error, info};

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn insert(&self, admin: Admin) -> RepositoryResult<Admin>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Admin>>;
}

pub struct MongoAdminRepository {
    collection: mongodb::Collection<Admin>,
}

impl MongoAdminRepository {
    pub fn new(db: &mongodb::Database, config: &MongoConfig) -> Self {
        MongoAdminRepository {
            collection: db.collection::<Admin>(&config.admins_collection),
        }
    }
}

#[async_trait]
impl AdminRepository for MongoAdminRepository {
    #[tracing::instrument(skip(self, admin), fields(email = %admin.email))]
    async fn insert(&self, mut admin: Admin) -> RepositoryResult<Admin> {
        admin.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        admin.created_at = Some(now.clone());
        admin.updated_at = Some(now);
        match self.collection.insert_one(admin.clone(), None).await {
            Ok(_) => {
                info!("Admin account created");
                Ok(admin)
            }
            Err(e) => {
                error!("Failed to insert admin: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        let filter = doc! { "email": email };
        self.collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find admin by email: {}", e)))
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Admin>> {
        let filter = doc! { "_id": *id };
        self.collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find admin by id: {}", e)))
    }
}
