//! # Vestibule
//!
//! `vestibule` is a minimal username/password authentication service. It
//! handles signup, login, logout, and cookie-backed session management for a
//! web application front end.
//!
//! ## Sessions
//!
//! A successful signup or login issues a signed `HS256` token carrying the
//! user id and an expiry seven days out. The token travels in an `HttpOnly`
//! cookie named `session`; reading the current user slides the cookie's
//! `Max-Age` forward without re-extending the signed expiry. A token that
//! fails verification for any reason is treated exactly like a missing
//! cookie.
//!
//! ## Passwords
//!
//! Passwords are hashed with bcrypt before storage and never persisted or
//! logged in plaintext. The browser may additionally encipher the password
//! field with AES-256-CBC before submission (`ivHex:cipherHex`); this is a
//! defense-in-depth obfuscation layer under TLS, never a replacement for it.
//!
//! ## Accounts
//!
//! One account per email, enforced by the database unique index; the
//! application-level pre-check only exists to produce a friendlier field
//! error. Login failures collapse into a single generic message so that
//! accounts cannot be enumerated.

pub mod api;
pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
