//! Cookie-backed session store.
//!
//! The signed token is the whole session state; the server keeps nothing.
//! Refresh slides the cookie's `Max-Age` forward while leaving the token's
//! embedded expiry untouched, so the signed seven-day window caps the total
//! session lifetime no matter how active the user is.

use anyhow::{Context, Result};
use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

use super::{state::AuthConfig, token};
use crate::store::users::{self, PublicUser};

pub const SESSION_COOKIE_NAME: &str = "session";

/// Sign a fresh token for a user and build its `Set-Cookie` value.
///
/// # Errors
/// Returns an error if signing fails or the cookie value is malformed.
pub fn create_session(
    config: &AuthConfig,
    secret: &SecretString,
    user_id: Uuid,
) -> Result<HeaderValue> {
    let token = token::sign(user_id, secret, config.session_ttl_seconds())?;
    session_cookie(config, &token).context("invalid session cookie value")
}

/// Re-issue the presented cookie with a fresh `Max-Age`.
///
/// The token itself is reused unchanged: the cookie wrapper slides, the
/// signed expiry does not. Returns `None` when there is no valid session.
#[must_use]
pub fn refresh_session(
    config: &AuthConfig,
    secret: &SecretString,
    headers: &HeaderMap,
) -> Option<HeaderValue> {
    let token = extract_session_token(headers)?;
    token::verify(&token, secret)?;
    session_cookie(config, &token).ok()
}

/// Resolve the session cookie to the user's public fields.
///
/// Missing, tampered, and expired cookies are all `Ok(None)`; only a
/// persistence failure is an error.
///
/// # Errors
/// Returns an error if the user lookup fails.
pub async fn current_user(
    headers: &HeaderMap,
    secret: &SecretString,
    pool: &PgPool,
) -> Result<Option<PublicUser>> {
    let Some(token) = extract_session_token(headers) else {
        return Ok(None);
    };
    let Some(claims) = token::verify(&token, secret) else {
        return Ok(None);
    };
    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        return Ok(None);
    };

    users::find_public_by_id(pool, user_id).await
}

/// Build a secure `HttpOnly` cookie carrying the session token.
pub(crate) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Cookie that removes the session. Deletion is idempotent.
pub fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("session-signing-secret")
    }

    fn https_config() -> AuthConfig {
        AuthConfig::new("https://vestibule.dev".to_string())
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).expect("valid header"));
        headers
    }

    #[test]
    fn created_cookie_carries_the_expected_attributes() -> Result<()> {
        let cookie = create_session(&https_config(), &secret(), Uuid::new_v4())?;
        let cookie = cookie.to_str().expect("ascii cookie");

        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("Secure"));
        Ok(())
    }

    #[test]
    fn plain_http_frontend_omits_secure() -> Result<()> {
        let config = AuthConfig::new("http://localhost:3000".to_string());
        let cookie = create_session(&config, &secret(), Uuid::new_v4())?;
        assert!(!cookie.to_str().expect("ascii cookie").contains("Secure"));
        Ok(())
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(&https_config()).expect("valid cookie");
        let cookie = cookie.to_str().expect("ascii cookie");
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn extract_finds_the_session_among_other_cookies() {
        let headers = cookie_headers("theme=dark; session=abc.def.ghi; lang=en");
        assert_eq!(
            extract_session_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn extract_returns_none_without_a_session_cookie() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
        let headers = cookie_headers("theme=dark; lang=en");
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn refresh_reuses_the_token_with_a_fresh_max_age() -> Result<()> {
        let config = https_config();
        let user_id = Uuid::new_v4();
        let token = token::sign(user_id, &secret(), config.session_ttl_seconds())?;

        let headers = cookie_headers(&format!("session={token}"));
        let refreshed = refresh_session(&config, &secret(), &headers)
            .expect("valid session should refresh");
        let refreshed = refreshed.to_str().expect("ascii cookie");

        // Same token, slid wrapper; the signed expiry is untouched
        assert!(refreshed.contains(&token));
        assert!(refreshed.contains("Max-Age=604800"));
        Ok(())
    }

    #[test]
    fn refresh_rejects_an_expired_token() -> Result<()> {
        let config = https_config();
        let token = token::sign(Uuid::new_v4(), &secret(), -1)?;
        let headers = cookie_headers(&format!("session={token}"));
        assert_eq!(refresh_session(&config, &secret(), &headers), None);
        Ok(())
    }

    #[test]
    fn refresh_rejects_a_missing_cookie() {
        assert_eq!(
            refresh_session(&https_config(), &secret(), &HeaderMap::new()),
            None
        );
    }
}
