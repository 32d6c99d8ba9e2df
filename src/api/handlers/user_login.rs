//! Login: validate, look up, verify the credential, open a session.
//!
//! A missing user and a wrong password produce the same generic message so
//! accounts cannot be enumerated.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};

use super::{
    decipher_password, field_errors_response, message_response, redirect_response,
    types::{FieldErrorsBody, LoginRequest, MessageBody},
};
use crate::{
    auth::{password, session, validate::validate_login, AuthConfig},
    cli::globals::GlobalArgs,
    store::users,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const LOGIN_FAILED: &str = "An error occurred. Please try again.";

#[utoipa::path(
    post,
    path= "/user/login",
    request_body = LoginRequest,
    responses (
        (status = 303, description = "Login successful, session cookie set, redirect to the landing route"),
        (status = 422, description = "Validation failed", body = FieldErrorsBody),
        (status = 401, description = "Invalid email or password", body = MessageBody),
        (status = 500, description = "Login failed", body = MessageBody),
    ),
    tag= "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    config: Extension<Arc<AuthConfig>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let password = match decipher_password(request.password, &globals) {
        Ok(plaintext) => plaintext,
        Err(response) => return response,
    };

    let data = match validate_login(&request.email, &password) {
        Ok(data) => data,
        Err(errors) => return field_errors_response(StatusCode::UNPROCESSABLE_ENTITY, errors),
    };

    let user = match users::find_by_email(&pool, &data.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("Login for an unknown email");
            return message_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS);
        }
        Err(err) => {
            error!("Failed to look up user: {err:#}");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
        }
    };

    match password::verify_blocking(data.password, user.password_hash).await {
        Ok(true) => (),
        Ok(false) => {
            debug!("Password mismatch");
            return message_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS);
        }
        Err(err) => {
            error!("Failed to verify password: {err:#}");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
        }
    }

    let cookie = match session::create_session(&config, globals.session_secret(), user.id) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to create session: {err:#}");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
        }
    };

    redirect_response(config.landing_path(), Some(cookie))
}
