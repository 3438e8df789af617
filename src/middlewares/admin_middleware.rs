use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::warn;

use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, ADMIN_ROLE};

pub struct AdminAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Rejects requests without a valid admin access token. The decoded claims
/// are attached to the request extensions for downstream handlers.
pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let claims = state.jwt_utils.validate_access_token(&token).map_err(|e| {
        warn!("Rejected access token: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    if claims.role != ADMIN_ROLE {
        warn!("Non-admin role {} on admin route", claims.role);
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
