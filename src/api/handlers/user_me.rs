//! Current user: resolve the session cookie and slide its window.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::types::SessionUser;
use crate::{
    auth::{session, AuthConfig},
    cli::globals::GlobalArgs,
};

#[utoipa::path(
    get,
    path= "/user/me",
    responses (
        (status = 200, description = "Session is active; cookie window slides forward", body = SessionUser),
        (status = 204, description = "No active session"),
    ),
    tag= "auth"
)]
pub async fn me(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    config: Extension<Arc<AuthConfig>>,
) -> impl IntoResponse {
    // An unverifiable or expired cookie is identical to no cookie at all
    let user = match session::current_user(&headers, globals.session_secret(), &pool).await {
        Ok(Some(user)) => user,
        Ok(None) => return StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to resolve the current user: {err:#}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // Refresh on access: same token, fresh cookie Max-Age
    let mut response_headers = HeaderMap::new();
    if let Some(cookie) = session::refresh_session(&config, globals.session_secret(), &headers) {
        response_headers.insert(SET_COOKIE, cookie);
    }

    let body = SessionUser {
        id: user.id.to_string(),
        name: user.name,
        email: user.email,
    };

    (StatusCode::OK, response_headers, Json(body)).into_response()
}
