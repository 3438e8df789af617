use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::handler::analytics_handler::{dashboard_summary_handler, location_insights_handler, user_analytics_handler};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::analytics_service::AnalyticsServiceImpl;
use crate::service::directory_service::DirectoryServiceImpl;

pub fn analytics_router(
    analytics: Arc<AnalyticsServiceImpl>,
    directory: Arc<DirectoryServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
) -> Router {
    let charts = Router::new()
        .route("/analytics/users", get(user_analytics_handler))
        .route("/analytics/locations", get(location_insights_handler))
        .with_state(analytics);

    let summary = Router::new()
        .route("/analytics/summary", get(dashboard_summary_handler))
        .with_state(directory);

    charts
        .merge(summary)
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
}
