//! Signed session token codec.
//!
//! Tokens are compact `HS256` JWTs carrying only the user id and timestamps.
//! Verification checks signature and expiry atomically with zero leeway; any
//! failure yields `None`, so callers branch on the option rather than on an
//! error type.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Session payload: fixed schema, validated on decode.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix seconds)
    pub exp: i64,
    /// Issued at (Unix seconds)
    pub iat: i64,
}

pub(crate) fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Sign a session token for a user, valid for `ttl_seconds` from now.
///
/// # Errors
/// Returns an error if the signing primitive fails; fatal to the request.
pub fn sign(user_id: Uuid, secret: &SecretString, ttl_seconds: i64) -> Result<String> {
    let now = now_unix_seconds();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now.saturating_add(ttl_seconds),
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .context("failed to sign session token")
}

/// Verify a session token and return its claims.
///
/// Malformed, tampered, and expired tokens are indistinguishable: all `None`.
#[must_use]
pub fn verify(token: &str, secret: &SecretString) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // A token expired one second ago is already no session
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("session-signing-secret")
    }

    #[test]
    fn verify_returns_the_signed_claims() -> Result<()> {
        let user_id = Uuid::new_v4();
        let token = sign(user_id, &secret(), 3600)?;

        let claims = verify(&token, &secret()).expect("token should verify");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp, claims.iat + 3600);
        Ok(())
    }

    #[test]
    fn tampered_tokens_verify_to_none() -> Result<()> {
        let token = sign(Uuid::new_v4(), &secret(), 3600)?;

        // Flip the final signature character
        let mut tampered = token.clone();
        let last = tampered.pop().expect("token is not empty");
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_eq!(verify(&tampered, &secret()), None);

        // Flip a body character, keeping the signature intact
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let body = &mut parts[1];
        let first = body.remove(0);
        body.insert(0, if first == 'A' { 'B' } else { 'A' });
        assert_eq!(verify(&parts.join("."), &secret()), None);
        Ok(())
    }

    #[test]
    fn wrong_secret_verifies_to_none() -> Result<()> {
        let token = sign(Uuid::new_v4(), &secret(), 3600)?;
        assert_eq!(verify(&token, &SecretString::from("other-secret")), None);
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected_despite_a_valid_signature() -> Result<()> {
        let token = sign(Uuid::new_v4(), &secret(), -1)?;
        assert_eq!(verify(&token, &secret()), None);
        Ok(())
    }

    #[test]
    fn garbage_verifies_to_none() {
        assert_eq!(verify("not.a.token", &secret()), None);
        assert_eq!(verify("", &secret()), None);
    }
}
