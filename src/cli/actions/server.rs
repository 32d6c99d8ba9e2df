use crate::{
    api,
    auth::{AuthConfig, PasswordPolicy},
    cli::globals::GlobalArgs,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub session_secret: SecretString,
    pub cipher_secret: SecretString,
    pub session_ttl_seconds: i64,
    pub bcrypt_cost: u32,
    pub frontend_base_url: String,
    pub landing_path: String,
    pub login_path: String,
    pub password_policy: PasswordPolicy,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the DSN is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    // Fail early on an unparseable DSN instead of at first connect
    Url::parse(&args.dsn).context("invalid database connection string")?;

    let globals = GlobalArgs::new(args.session_secret, args.cipher_secret);

    let config = AuthConfig::new(args.frontend_base_url)
        .with_landing_path(args.landing_path)
        .with_login_path(args.login_path)
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_bcrypt_cost(args.bcrypt_cost)
        .with_password_policy(args.password_policy);

    debug!("Auth config: {:?}", config);

    api::new(args.port, args.dsn, &globals, config).await?;

    Ok(())
}
