use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::service::analytics_service::{AnalyticsService, AnalyticsServiceImpl};
use crate::service::directory_service::{DirectoryService, DirectoryServiceImpl};
use crate::util::error::HandlerError;

pub async fn user_analytics_handler(
    State(service): State<Arc<AnalyticsServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let analytics = service.user_analytics().await?;
    Ok(Json(analytics))
}

pub async fn location_insights_handler(
    State(service): State<Arc<AnalyticsServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let insights = service.location_insights().await?;
    Ok(Json(insights))
}

pub async fn dashboard_summary_handler(
    State(service): State<Arc<DirectoryServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let summary = service.dashboard_summary().await?;
    Ok(Json(summary))
}
