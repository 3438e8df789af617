use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::handler::user_handler::{get_user_handler, list_users_handler};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::directory_service::DirectoryServiceImpl;

pub fn user_router(service: Arc<DirectoryServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/{id}", get(get_user_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
        .with_state(service)
}
