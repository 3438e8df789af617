use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, RefreshTokenRequest};
use crate::handler::extract::JsonBody;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::util::error::HandlerError;

pub async fn login_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let res = service.login(payload.email, payload.password).await?;
    Ok(Json(res))
}

pub async fn refresh_token_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    JsonBody(payload): JsonBody<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let tokens = service.refresh_token(payload.refresh_token).await?;
    Ok(Json(tokens))
}
