use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::model::agent::Agent;
use crate::model::user::User;
use crate::repository::agent_repo::AgentRepository;
use crate::repository::user_repo::{SortOrder, UserRepository};
use crate::util::error::ServiceError;

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user_count: u64,
    pub agent_count: u64,
    pub reported_user_count: u64,
}

#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn list_users(&self, order: SortOrder, search: Option<String>) -> Result<Vec<User>, ServiceError>;
    async fn get_user(&self, id: ObjectId) -> Result<User, ServiceError>;
    async fn list_agents(&self) -> Result<Vec<Agent>, ServiceError>;
    async fn get_agent(&self, id: ObjectId) -> Result<Agent, ServiceError>;
    async fn list_agent_referrals(&self, reference_code: String) -> Result<Vec<User>, ServiceError>;
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ServiceError>;
}

pub struct DirectoryServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub agent_repo: Arc<dyn AgentRepository>,
}

impl DirectoryServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, agent_repo: Arc<dyn AgentRepository>) -> Self {
        Self { user_repo, agent_repo }
    }
}

#[async_trait]
impl DirectoryService for DirectoryServiceImpl {
    #[instrument(skip(self))]
    async fn list_users(&self, order: SortOrder, search: Option<String>) -> Result<Vec<User>, ServiceError> {
        let users = self.user_repo.list(order, search.as_deref()).await.map_err(|e| {
            error!("Failed to list users: {}", e);
            ServiceError::from(e)
        })?;
        info!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_user(&self, id: ObjectId) -> Result<User, ServiceError> {
        let user = self.user_repo.find_by_id(&id).await.map_err(|e| {
            error!("Failed to fetch user: {}", e);
            ServiceError::from(e)
        })?;
        user.ok_or_else(|| ServiceError::NotFound(format!("User not found: {}", id)))
    }

    #[instrument(skip(self))]
    async fn list_agents(&self) -> Result<Vec<Agent>, ServiceError> {
        let agents = self.agent_repo.list().await.map_err(|e| {
            error!("Failed to list agents: {}", e);
            ServiceError::from(e)
        })?;
        info!("Listed {} agents", agents.len());
        Ok(agents)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_agent(&self, id: ObjectId) -> Result<Agent, ServiceError> {
        let agent = self.agent_repo.find_by_id(&id).await.map_err(|e| {
            error!("Failed to fetch agent: {}", e);
            ServiceError::from(e)
        })?;
        agent.ok_or_else(|| ServiceError::NotFound(format!("Agent not found: {}", id)))
    }

    #[instrument(skip(self))]
    async fn list_agent_referrals(&self, reference_code: String) -> Result<Vec<User>, ServiceError> {
        let reference_code = reference_code.trim();
        if reference_code.is_empty() {
            return Err(ServiceError::InvalidInput("Reference code cannot be empty".to_string()));
        }
        let users = self.user_repo.list_by_agent_ref_code(reference_code).await.map_err(|e| {
            error!("Failed to list referrals: {}", e);
            ServiceError::from(e)
        })?;
        info!("Agent {} referred {} users", reference_code, users.len());
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ServiceError> {
        let (user_count, agent_count, reported_user_count) = tokio::try_join!(
            self.user_repo.count(),
            self.agent_repo.count(),
            self.user_repo.count_reported(),
        )
        .map_err(|e| {
            error!("Failed to count dashboard totals: {}", e);
            ServiceError::from(e)
        })?;
        Ok(DashboardSummary { user_count, agent_count, reported_user_count })
    }
}
