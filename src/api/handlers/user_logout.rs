//! Logout: clear the session cookie and send the user back to login.

use axum::{extract::Extension, response::IntoResponse};
use std::sync::Arc;
use tracing::error;

use super::redirect_response;
use crate::auth::{session, AuthConfig};

#[utoipa::path(
    post,
    path= "/user/logout",
    responses (
        (status = 303, description = "Session cleared, redirect to the login route"),
    ),
    tag= "auth"
)]
pub async fn logout(config: Extension<Arc<AuthConfig>>) -> impl IntoResponse {
    // Always clear the cookie, even when no session was presented
    let cookie = match session::clear_session_cookie(&config) {
        Ok(cookie) => Some(cookie),
        Err(err) => {
            error!("Failed to build the clearing cookie: {err}");
            None
        }
    };

    redirect_response(config.login_path(), cookie)
}
