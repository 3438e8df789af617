use crate::config::mongo_conf::MongoConfig;
use crate::model::report::ReportReason;
use crate::model::user::User;
use crate::repository::mongo;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;
use serde::Deserialize;
use tracing::{error, info};

/// Ordering of the user listing by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    fn direction(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

/// `$or` clauses matching `name` or `email` case-insensitively. The term is
/// trimmed and escaped; a blank term yields no clauses.
pub fn search_clauses(term: Option<&str>) -> Option<Vec<Document>> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let pattern = regex::escape(term);
    Some(vec![
        doc! { "name": { "$regex": pattern.clone(), "$options": "i" } },
        doc! { "email": { "$regex": pattern, "$options": "i" } },
    ])
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `search` narrows the listing to users whose name or email contains it.
    async fn list(&self, order: SortOrder, search: Option<&str>) -> RepositoryResult<Vec<User>>;
    async fn list_reported(&self, search: Option<&str>) -> RepositoryResult<Vec<User>>;
    async fn list_by_agent_ref_code(&self, reference_code: &str) -> RepositoryResult<Vec<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    /// Writes `verifiedByAdmin` and `adminTexts` together.
    async fn set_verification(&self, id: &ObjectId, verified: bool, admin_texts: &str) -> RepositoryResult<()>;
    /// Writes `reportReason` and `reported` together.
    async fn set_report_status(&self, id: &ObjectId, reasons: &[ReportReason], reported: bool) -> RepositoryResult<()>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn count_reported(&self) -> RepositoryResult<u64>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &mongodb::Database, config: &MongoConfig) -> Self {
        MongoUserRepository {
            collection: db.collection::<User>(&config.users_collection),
        }
    }

    async fn find_many(&self, filter: Option<Document>, options: Option<FindOptions>) -> RepositoryResult<Vec<User>> {
        let cursor = self.collection.find(filter, options).await.map_err(|e| {
            error!("Failed to query users: {}", e);
            RepositoryError::database(format!("Failed to query users: {}", e))
        })?;
        mongo::collect(cursor, "user").await
    }

    async fn set_fields(&self, id: &ObjectId, fields: Document) -> RepositoryResult<()> {
        let filter = doc! { "_id": *id };
        let update = doc! { "$set": fields };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            // matched, not modified: a write of identical values still succeeds
            Ok(update_result) if update_result.matched_count > 0 => {
                info!(user_id = %id, modified = update_result.modified_count, "User fields updated");
                Ok(())
            }
            Ok(_) => {
                error!("No user found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!("No user found to update for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to update user: {}", e);
                Err(RepositoryError::database(format!("Failed to update user: {}", e)))
            }
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self, order: SortOrder, search: Option<&str>) -> RepositoryResult<Vec<User>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": order.direction() })
            .build();
        let filter = search_clauses(search).map(|clauses| doc! { "$or": clauses });
        let users = self.find_many(filter, Some(options)).await?;
        info!("Fetched {} users", users.len());
        Ok(users)
    }

    #[tracing::instrument(skip(self))]
    async fn list_reported(&self, search: Option<&str>) -> RepositoryResult<Vec<User>> {
        let mut filter = doc! { "reported": true };
        if let Some(clauses) = search_clauses(search) {
            filter.insert("$or", clauses);
        }
        let users = self.find_many(Some(filter), None).await?;
        info!("Fetched {} reported users", users.len());
        Ok(users)
    }

    #[tracing::instrument(skip(self))]
    async fn list_by_agent_ref_code(&self, reference_code: &str) -> RepositoryResult<Vec<User>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let users = self
            .find_many(Some(doc! { "agentRefCode": reference_code }), Some(options))
            .await?;
        info!("Fetched {} users referred by {}", users.len(), reference_code);
        Ok(users)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": *id };
        self.collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))
    }

    #[tracing::instrument(skip(self, admin_texts), fields(id = %id))]
    async fn set_verification(&self, id: &ObjectId, verified: bool, admin_texts: &str) -> RepositoryResult<()> {
        self.set_fields(id, doc! { "verifiedByAdmin": verified, "adminTexts": admin_texts })
            .await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn set_report_status(&self, id: &ObjectId, reasons: &[ReportReason], reported: bool) -> RepositoryResult<()> {
        let tags: Vec<&str> = reasons.iter().map(ReportReason::as_str).collect();
        self.set_fields(id, doc! { "reportReason": tags, "reported": reported })
            .await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": *id };
        let result = self.collection.delete_one(filter, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("User deleted successfully for ID: {}", id);
                Ok(())
            }
            Ok(_) => {
                error!("No user found to delete for ID: {}", id);
                Err(RepositoryError::not_found(format!("No user found to delete for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to delete user: {}", e);
                Err(RepositoryError::database(format!("Failed to delete user: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count users: {}", e)))
    }

    #[tracing::instrument(skip(self))]
    async fn count_reported(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(doc! { "reported": true }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count reported users: {}", e)))
    }
}
