use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tracing::{error, info, instrument};

use crate::model::user::User;
use crate::repository::user_repo::{SortOrder, UserRepository};
use crate::service::analytics::{self, StateInsight, UserAnalytics};
use crate::util::error::ServiceError;

#[async_trait]
pub trait AnalyticsService: Send + Sync {
    async fn user_analytics(&self) -> Result<UserAnalytics, ServiceError>;
    async fn location_insights(&self) -> Result<Vec<StateInsight>, ServiceError>;
}

/// Recomputes the charts from a fresh read of the users collection on every
/// call; nothing is cached.
pub struct AnalyticsServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl AnalyticsServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    async fn all_users(&self) -> Result<Vec<User>, ServiceError> {
        self.user_repo.list(SortOrder::default(), None).await.map_err(|e| {
            error!("Failed to load users for analytics: {}", e);
            ServiceError::from(e)
        })
    }
}

#[async_trait]
impl AnalyticsService for AnalyticsServiceImpl {
    #[instrument(skip(self))]
    async fn user_analytics(&self) -> Result<UserAnalytics, ServiceError> {
        let users = self.all_users().await?;
        let result = analytics::aggregate(&users, Utc::now().year());
        info!("Aggregated analytics over {} users", result.total_users);
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn location_insights(&self) -> Result<Vec<StateInsight>, ServiceError> {
        let users = self.all_users().await?;
        let insights = analytics::location_insights(&users);
        info!("Computed location insights for {} states", insights.len());
        Ok(insights)
    }
}
