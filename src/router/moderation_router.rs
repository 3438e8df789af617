use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::moderation_handler::{
    delete_user_handler,
    list_reasons_handler,
    list_reported_users_handler,
    remove_reasons_handler,
    unverify_user_handler,
    verify_user_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::moderation_service::ModerationServiceImpl;

pub fn moderation_router(service: Arc<ModerationServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    Router::new()
        .route("/moderation/reported", get(list_reported_users_handler))
        .route("/moderation/users/{id}", delete(delete_user_handler))
        .route("/moderation/users/{id}/reasons", get(list_reasons_handler))
        .route("/moderation/users/{id}/reasons/remove", post(remove_reasons_handler))
        .route("/moderation/users/{id}/verify", put(verify_user_handler))
        .route("/moderation/users/{id}/unverify", put(unverify_user_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
        .with_state(service)
}
