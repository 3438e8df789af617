use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::dto::user_dto::ListUsersQuery;
use crate::handler::extract::QueryParams;
use crate::handler::parse_object_id;
use crate::service::directory_service::{DirectoryService, DirectoryServiceImpl};
use crate::util::error::HandlerError;

// GET /users?order=asc|desc&search=
pub async fn list_users_handler(
    State(service): State<Arc<DirectoryServiceImpl>>,
    QueryParams(query): QueryParams<ListUsersQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    query.validate().map_err(HandlerError::validation)?;
    let users = service
        .list_users(query.order.unwrap_or_default(), query.search)
        .await?;
    Ok(Json(users))
}

pub async fn get_user_handler(
    State(service): State<Arc<DirectoryServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    let user = service.get_user(id).await?;
    Ok(Json(user))
}
