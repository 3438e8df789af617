use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::handler::agent_handler::{get_agent_handler, list_agent_referrals_handler, list_agents_handler};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::directory_service::DirectoryServiceImpl;

pub fn agent_router(service: Arc<DirectoryServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    Router::new()
        .route("/agents", get(list_agents_handler))
        .route("/agents/{id}", get(get_agent_handler))
        .route("/agents/referrals/{code}", get(list_agent_referrals_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
        .with_state(service)
}
