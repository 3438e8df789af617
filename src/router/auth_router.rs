use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handler::auth_handler::{login_handler, refresh_token_handler};
use crate::service::admin_service::AdminServiceImpl;

pub fn auth_router(service: Arc<AdminServiceImpl>) -> Router {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh-token", post(refresh_token_handler))
        .with_state(service)
}
