use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::admin_user_conf::AdminUserConfig;
use crate::config::app_conf::AppConfig;
use crate::config::{ConfigError, JwtConfig, MessagingConfig, MongoConfig};
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::admin_repo::MongoAdminRepository;
use crate::repository::agent_repo::MongoAgentRepository;
use crate::repository::mongo;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::agent_router::agent_router;
use crate::router::analytics_router::analytics_router;
use crate::router::auth_router::auth_router;
use crate::router::moderation_router::moderation_router;
use crate::router::user_router::user_router;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::service::analytics_service::AnalyticsServiceImpl;
use crate::service::directory_service::DirectoryServiceImpl;
use crate::service::moderation_service::ModerationServiceImpl;
use crate::util::error::ServiceError;
use crate::util::jwt::JwtTokenUtilsImpl;
use crate::util::messaging::MessageLinkBuilder;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid listen address: {0}")]
    Address(String),
}

/// Every service the HTTP layer talks to.
#[derive(Clone)]
pub struct Services {
    pub admin: Arc<AdminServiceImpl>,
    pub directory: Arc<DirectoryServiceImpl>,
    pub moderation: Arc<ModerationServiceImpl>,
    pub analytics: Arc<AnalyticsServiceImpl>,
}

/// Assembles the full route table: public auth and health routes plus the
/// admin-protected resource routers.
pub fn build_router(services: &Services, admin_auth_state: Arc<AdminAuthState>) -> Router {
    Router::new()
        .merge(auth_router(services.admin.clone()))
        .merge(user_router(services.directory.clone(), admin_auth_state.clone()))
        .merge(agent_router(services.directory.clone(), admin_auth_state.clone()))
        .merge(moderation_router(services.moderation.clone(), admin_auth_state.clone()))
        .merge(analytics_router(
            services.analytics.clone(),
            services.directory.clone(),
            admin_auth_state,
        ))
        .route("/health", get(|| async { "OK" }))
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub services: Services,
}

impl App {
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;
        let messaging_config = MessagingConfig::from_env()?;

        let db = mongo::connect(&mongo_config).await?;
        let user_repo = Arc::new(MongoUserRepository::new(&db, &mongo_config));
        let agent_repo = Arc::new(MongoAgentRepository::new(&db, &mongo_config));
        let admin_repo = Arc::new(MongoAdminRepository::new(&db, &mongo_config));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let services = Services {
            admin: Arc::new(AdminServiceImpl::new(admin_repo, jwt_utils.clone())),
            directory: Arc::new(DirectoryServiceImpl::new(user_repo.clone(), agent_repo)),
            moderation: Arc::new(ModerationServiceImpl::new(
                user_repo.clone(),
                MessageLinkBuilder::new(messaging_config),
            )),
            analytics: Arc::new(AnalyticsServiceImpl::new(user_repo)),
        };

        let admin_auth_state = Arc::new(AdminAuthState { jwt_utils });
        let router = build_router(&services, admin_auth_state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let app = App { config, router, services };
        app.create_first_admin().await;
        Ok(app)
    }

    pub async fn start(self) -> Result<(), AppError> {
        let host = self
            .config
            .host
            .parse()
            .map_err(|_| AppError::Address(self.config.host.clone()))?;
        let addr = SocketAddr::new(host, self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    /// Seeds the operator account from `ADMIN_*` when it does not exist yet.
    async fn create_first_admin(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        match self
            .services
            .admin
            .register(admin_conf.name, admin_conf.email, admin_conf.password)
            .await
        {
            Ok(_) => info!("First admin user created."),
            Err(ServiceError::Conflict(_)) => info!("Admin user already exists, skipping creation."),
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
