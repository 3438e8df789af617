use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::model::admin::Admin;
use crate::repository::admin_repo::AdminRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, TokenPair, ADMIN_ROLE};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, Serialize)]
pub struct AdminProfile {
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<String>,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        AdminProfile {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            role: admin.role,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminAuthResponse {
    pub admin: AdminProfile,
    pub tokens: TokenPair,
}

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn register(&self, name: String, email: String, password: String) -> Result<AdminProfile, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<AdminAuthResponse, ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError>;
}

pub struct AdminServiceImpl {
    pub admin_repo: Arc<dyn AdminRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AdminServiceImpl {
    pub fn new(admin_repo: Arc<dyn AdminRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { admin_repo, jwt_utils }
    }

    fn issue_tokens(&self, id: &str, email: &str, role: &str) -> Result<TokenPair, ServiceError> {
        self.jwt_utils
            .generate_token_pair(id, email, role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    #[instrument(skip(self, name, password), fields(email = %email))]
    async fn register(&self, name: String, email: String, password: String) -> Result<AdminProfile, ServiceError> {
        info!("Registering admin");
        if self.admin_repo.find_by_email(&email).await?.is_some() {
            warn!("Admin already exists");
            return Err(ServiceError::Conflict(format!("Admin already exists: {}", email)));
        }

        let password_hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;
        let admin = Admin {
            id: None,
            name,
            email,
            password_hash,
            role: ADMIN_ROLE.to_string(),
            created_at: None,
            updated_at: None,
        };

        match self.admin_repo.insert(admin).await {
            Ok(inserted) => {
                info!("Admin registered");
                Ok(AdminProfile::from(inserted))
            }
            Err(e) => {
                error!("Failed to insert admin: {}", e);
                Err(ServiceError::from(e))
            }
        }
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<AdminAuthResponse, ServiceError> {
        info!("Admin login attempt");
        let admin = match self.admin_repo.find_by_email(&email).await {
            Ok(Some(admin)) => admin,
            Ok(None) => {
                warn!("Unknown admin email");
                return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
            Err(e) => {
                error!("Failed to fetch admin for login: {}", e);
                return Err(ServiceError::from(e));
            }
        };

        let valid = PasswordUtilsImpl::verify_password(&password, &admin.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Wrong password for admin");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let id = admin.id.map(|id| id.to_hex()).unwrap_or_default();
        let tokens = self.issue_tokens(&id, &admin.email, &admin.role)?;
        info!("Admin logged in");
        Ok(AdminAuthResponse { admin: AdminProfile::from(admin), tokens })
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError> {
        let claims = self
            .jwt_utils
            .validate_refresh_token(&refresh_token)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Invalid refresh token subject".to_string()))?;
        let admin = self
            .admin_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Admin no longer exists".to_string()))?;

        let tokens = self.issue_tokens(&claims.sub, &admin.email, &admin.role)?;
        info!("Token refreshed");
        Ok(tokens)
    }
}
