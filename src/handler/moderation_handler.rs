use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::dto::user_dto::{RemoveReasonsRequest, SearchQuery, UnverifyRequest};
use crate::handler::extract::{JsonBody, QueryParams};
use crate::handler::parse_object_id;
use crate::service::moderation_service::{ModerationService, ModerationServiceImpl};
use crate::util::error::HandlerError;

// GET /moderation/reported?search=
pub async fn list_reported_users_handler(
    State(service): State<Arc<ModerationServiceImpl>>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    query.validate().map_err(HandlerError::validation)?;
    let users = service.list_reported_users(query.search).await?;
    Ok(Json(users))
}

pub async fn list_reasons_handler(
    State(service): State<Arc<ModerationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    let reasons = service.list_reasons(id).await?;
    Ok(Json(reasons))
}

pub async fn remove_reasons_handler(
    State(service): State<Arc<ModerationServiceImpl>>,
    Path((id,)): Path<(String,)>,
    JsonBody(payload): JsonBody<RemoveReasonsRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let id = parse_object_id(&id, "user")?;
    let user = service.remove_reasons(id, payload.reasons).await?;
    Ok(Json(user))
}

pub async fn verify_user_handler(
    State(service): State<Arc<ModerationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    let outcome = service.verify(id).await?;
    Ok(Json(outcome))
}

pub async fn unverify_user_handler(
    State(service): State<Arc<ModerationServiceImpl>>,
    Path((id,)): Path<(String,)>,
    JsonBody(payload): JsonBody<UnverifyRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let id = parse_object_id(&id, "user")?;
    let outcome = service.unverify(id, payload.reason).await?;
    Ok(Json(outcome))
}

pub async fn delete_user_handler(
    State(service): State<Arc<ModerationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
