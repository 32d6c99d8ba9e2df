//! Password hashing and verification.
//!
//! bcrypt embeds a per-call random salt in the hash string and compares in
//! constant time on verification. A hashing failure is fatal to the request;
//! a wrong password is `Ok(false)`, not an error.

use anyhow::{Context, Result};

/// Hash a plaintext password for storage.
pub fn hash(plaintext: &str, cost: u32) -> Result<String> {
    bcrypt::hash(plaintext, cost).context("failed to hash password")
}

/// Check a plaintext password against a stored hash.
pub fn verify(plaintext: &str, hashed: &str) -> Result<bool> {
    bcrypt::verify(plaintext, hashed).context("failed to verify password")
}

/// [`hash`] on the blocking pool so concurrent requests are not starved.
pub async fn hash_blocking(plaintext: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || hash(&plaintext, cost))
        .await
        .context("password hashing task failed")?
}

/// [`verify`] on the blocking pool.
pub async fn verify_blocking(plaintext: String, hashed: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify(&plaintext, &hashed))
        .await
        .context("password verification task failed")?
}
