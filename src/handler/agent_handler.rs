use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::handler::parse_object_id;
use crate::service::directory_service::{DirectoryService, DirectoryServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_agents_handler(
    State(service): State<Arc<DirectoryServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let agents = service.list_agents().await?;
    Ok(Json(agents))
}

pub async fn get_agent_handler(
    State(service): State<Arc<DirectoryServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "agent")?;
    let agent = service.get_agent(id).await?;
    Ok(Json(agent))
}

// Users who signed up with the agent's reference code
pub async fn list_agent_referrals_handler(
    State(service): State<Arc<DirectoryServiceImpl>>,
    Path((code,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service.list_agent_referrals(code).await?;
    Ok(Json(users))
}
