use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::model::report::{ReasonDetails, ReportReason};
use crate::model::user::{User, VerificationState};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::messaging::MessageLinkBuilder;

/// Result of a verification change: the updated user plus a pre-filled chat
/// link the operator can use to tell them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub user: User,
    pub notification_link: Option<String>,
}

#[async_trait]
pub trait ModerationService: Send + Sync {
    async fn list_reported_users(&self, search: Option<String>) -> Result<Vec<User>, ServiceError>;
    async fn list_reasons(&self, id: ObjectId) -> Result<Vec<ReasonDetails>, ServiceError>;
    async fn remove_reasons(&self, id: ObjectId, to_remove: Vec<ReportReason>) -> Result<User, ServiceError>;
    async fn verify(&self, id: ObjectId) -> Result<VerificationOutcome, ServiceError>;
    async fn unverify(&self, id: ObjectId, reason: String) -> Result<VerificationOutcome, ServiceError>;
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError>;
}

/// `current` minus `to_remove`, keeping the order of `current`.
pub fn remaining_reasons(current: &[ReportReason], to_remove: &[ReportReason]) -> Vec<ReportReason> {
    current
        .iter()
        .filter(|reason| !to_remove.contains(reason))
        .cloned()
        .collect()
}

pub struct ModerationServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub links: MessageLinkBuilder,
}

impl ModerationServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, links: MessageLinkBuilder) -> Self {
        Self { user_repo, links }
    }

    async fn load_user(&self, id: &ObjectId) -> Result<User, ServiceError> {
        match self.user_repo.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                error!("User not found: {}", id);
                Err(ServiceError::NotFound(format!("User not found: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch user {}: {}", id, e);
                Err(ServiceError::from(e))
            }
        }
    }
}

#[async_trait]
impl ModerationService for ModerationServiceImpl {
    #[instrument(skip(self))]
    async fn list_reported_users(&self, search: Option<String>) -> Result<Vec<User>, ServiceError> {
        let users = self.user_repo.list_reported(search.as_deref()).await.map_err(|e| {
            error!("Failed to list reported users: {}", e);
            ServiceError::from(e)
        })?;
        info!("Listed {} reported users", users.len());
        Ok(users)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn list_reasons(&self, id: ObjectId) -> Result<Vec<ReasonDetails>, ServiceError> {
        let user = self.load_user(&id).await?;
        Ok(user.report_reason.iter().map(ReportReason::details).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn remove_reasons(&self, id: ObjectId, to_remove: Vec<ReportReason>) -> Result<User, ServiceError> {
        let mut user = self.load_user(&id).await?;
        let remaining = remaining_reasons(&user.report_reason, &to_remove);
        if remaining.len() == user.report_reason.len() {
            // nothing to remove: the stored document is left as written
            info!("No matching report reasons to remove");
            return Ok(user);
        }
        let reported = !remaining.is_empty();

        if let Err(e) = self.user_repo.set_report_status(&id, &remaining, reported).await {
            error!("Failed to update report reasons: {}", e);
            return Err(ServiceError::from(e));
        }

        info!(remaining = remaining.len(), reported, "Report reasons updated");
        user.report_reason = remaining;
        user.reported = reported;
        Ok(user)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn verify(&self, id: ObjectId) -> Result<VerificationOutcome, ServiceError> {
        let mut user = self.load_user(&id).await?;
        if user.verification_state() == VerificationState::Verified {
            warn!("User is already verified");
            return Err(ServiceError::Conflict("User is already verified".to_string()));
        }

        if let Err(e) = self.user_repo.set_verification(&id, true, "").await {
            error!("Failed to verify user: {}", e);
            return Err(ServiceError::from(e));
        }

        info!("User verified");
        user.verified_by_admin = true;
        user.admin_texts = None;
        let notification_link = self.links.verified_link(user.phone.as_deref());
        Ok(VerificationOutcome { user, notification_link })
    }

    #[instrument(skip(self, reason), fields(id = %id))]
    async fn unverify(&self, id: ObjectId, reason: String) -> Result<VerificationOutcome, ServiceError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ServiceError::InvalidInput("A reason is required to unverify a user".to_string()));
        }

        let mut user = self.load_user(&id).await?;
        if user.verification_state() != VerificationState::Verified {
            warn!("User is not verified");
            return Err(ServiceError::Conflict("Only verified users can be unverified".to_string()));
        }

        if let Err(e) = self.user_repo.set_verification(&id, false, reason).await {
            error!("Failed to unverify user: {}", e);
            return Err(ServiceError::from(e));
        }

        info!("User unverified");
        user.verified_by_admin = false;
        user.admin_texts = Some(reason.to_string());
        let notification_link = self.links.restricted_link(user.phone.as_deref());
        Ok(VerificationOutcome { user, notification_link })
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError> {
        match self.user_repo.delete(&id).await {
            Ok(()) => {
                info!("User deleted");
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete user: {}", e);
                Err(ServiceError::from(e))
            }
        }
    }
}
