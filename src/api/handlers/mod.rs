pub mod health;
pub use self::health::health;

pub mod user_signup;
pub use self::user_signup::signup;

pub mod user_login;
pub use self::user_login::login;

pub mod user_logout;
pub use self::user_logout::logout;

pub mod user_me;
pub use self::user_me::me;

pub mod types;

// common responses for the handlers
use axum::{
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};

use tracing::error;

use crate::auth::{transport, FieldErrors};
use crate::cli::globals::GlobalArgs;
use types::{FieldErrorsBody, MessageBody};

/// Undo the transport cipher when the password field carries one.
///
/// Plaintext passes through untouched; an enciphered value that does not
/// decrypt rejects the request (fail closed) rather than being treated as
/// the password itself.
pub(crate) fn decipher_password(raw: String, globals: &GlobalArgs) -> Result<String, Response> {
    if !transport::looks_enciphered(&raw) {
        return Ok(raw);
    }

    match transport::decrypt(&raw, globals.cipher_secret()) {
        Ok(plaintext) => Ok(plaintext),
        Err(err) => {
            error!("Failed to decrypt password payload: {err:#}");
            Err(field_errors_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                FieldErrors::single("password", "Unable to decrypt the password payload."),
            ))
        }
    }
}

pub(crate) fn field_errors_response(status: StatusCode, errors: FieldErrors) -> Response {
    (
        status,
        Json(FieldErrorsBody {
            errors: errors.into_map(),
        }),
    )
        .into_response()
}

pub(crate) fn message_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// `303 See Other` to a configured path, optionally setting the session cookie.
pub(crate) fn redirect_response(path: &str, cookie: Option<HeaderValue>) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(path) {
        headers.insert(LOCATION, location);
    }
    if let Some(cookie) = cookie {
        headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::SEE_OTHER, headers).into_response()
}
