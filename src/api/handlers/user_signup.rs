//! Signup: validate, check uniqueness, hash, persist, open a session.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::{
    decipher_password, field_errors_response, message_response, redirect_response,
    types::{FieldErrorsBody, MessageBody, SignupRequest},
};
use crate::{
    auth::{password, session, validate::validate_signup, AuthConfig, FieldErrors},
    cli::globals::GlobalArgs,
    store::users::{self, CreateOutcome},
};

const CREATE_FAILED: &str = "An error occurred while creating your account.";

fn email_conflict() -> FieldErrors {
    FieldErrors::single("email", "This email is already registered.")
}

#[utoipa::path(
    post,
    path= "/user/signup",
    request_body = SignupRequest,
    responses (
        (status = 303, description = "Account created, session cookie set, redirect to the landing route"),
        (status = 422, description = "Validation failed", body = FieldErrorsBody),
        (status = 409, description = "Email already registered", body = FieldErrorsBody),
        (status = 500, description = "Signup failed", body = MessageBody),
    ),
    tag= "auth"
)]
pub async fn signup(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    config: Extension<Arc<AuthConfig>>,
    payload: Option<Json<SignupRequest>>,
) -> impl IntoResponse {
    let request: SignupRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let password = match decipher_password(request.password, &globals) {
        Ok(plaintext) => plaintext,
        Err(response) => return response,
    };

    let data = match validate_signup(
        &request.name,
        &request.email,
        &password,
        config.password_policy(),
    ) {
        Ok(data) => data,
        Err(errors) => return field_errors_response(StatusCode::UNPROCESSABLE_ENTITY, errors),
    };

    // Pre-check for a friendlier error; the unique index is the authority
    match users::find_by_email(&pool, &data.email).await {
        Ok(Some(_)) => return field_errors_response(StatusCode::CONFLICT, email_conflict()),
        Ok(None) => (),
        Err(err) => {
            error!("Failed to check for an existing user: {err:#}");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED);
        }
    }

    let password_hash = match password::hash_blocking(data.password, config.bcrypt_cost()).await {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {err:#}");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED);
        }
    };

    let user = match users::create(&pool, &data.name, &data.email, &password_hash).await {
        Ok(CreateOutcome::Created(user)) => user,
        // Lost a same-email race; the index serialized it for us
        Ok(CreateOutcome::Conflict) => {
            return field_errors_response(StatusCode::CONFLICT, email_conflict());
        }
        Err(err) => {
            error!("Failed to insert user: {err:#}");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED);
        }
    };

    let cookie = match session::create_session(&config, globals.session_secret(), user.id) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to create session: {err:#}");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED);
        }
    };

    redirect_response(config.landing_path(), Some(cookie))
}
