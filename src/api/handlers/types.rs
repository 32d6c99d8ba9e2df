//! Request/response types for the auth endpoints.
//!
//! Both request types redact the password from their `Debug` output so a
//! stray log line can never leak a credential.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    /// Plaintext or `ivHex:cipherHex` when the transport cipher is engaged
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    /// Plaintext or `ivHex:cipherHex` when the transport cipher is engaged
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Field-keyed validation messages, rendered inline by the front end.
#[derive(ToSchema, Serialize, Debug)]
pub struct FieldErrorsBody {
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Generic single-message body for non-field errors.
#[derive(ToSchema, Serialize, Debug)]
pub struct MessageBody {
    pub message: String,
}

/// Public fields of the authenticated user.
#[derive(ToSchema, Serialize, Debug)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}
