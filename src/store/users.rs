//! User rows: lookups and creation.
//!
//! Schema lives in `db/sql/01_vestibule.sql`. The unique index on `email`
//! is the authoritative serializer for concurrent signups; the application
//! pre-check only improves the error message.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::is_unique_violation;

/// Full row needed to verify a login.
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Projection safe to hand back to clients. No password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(PublicUser),
    Conflict,
}

/// Look up a user by normalized email.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = "SELECT id, name, email, password_hash FROM users WHERE email = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to look up user by email")?;

    Ok(row.map(|row| UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
    }))
}

/// Look up a user's public fields by id.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn find_public_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PublicUser>> {
    let query = "SELECT id, name, email FROM users WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to look up user by id")?;

    Ok(row.map(|row| PublicUser {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
    }))
}

/// Insert a new user, mapping the unique-email violation to `Conflict`.
///
/// # Errors
/// Returns an error if the insert fails for any other reason.
pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<CreateOutcome> {
    let query = r"
        INSERT INTO users
            (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(CreateOutcome::Created(PublicUser {
            id: row.get("id"),
            name: name.to_string(),
            email: email.to_string(),
        })),
        Err(err) if is_unique_violation(&err) => Ok(CreateOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}
