use anyhow::{Context, Result};
use clap::{Arg, Command};
use secrecy::SecretString;

use crate::auth::PasswordPolicy;

/// Auth arguments extracted from the CLI matches.
pub struct Options {
    pub session_secret: SecretString,
    pub cipher_secret: SecretString,
    pub session_ttl_seconds: i64,
    pub bcrypt_cost: u32,
    pub frontend_base_url: String,
    pub landing_path: String,
    pub login_path: String,
    pub password_policy: PasswordPolicy,
}

impl Options {
    /// Extract the auth options.
    ///
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        Ok(Self {
            session_secret: matches
                .get_one::<String>("session-secret")
                .map(|s| SecretString::from(s.clone()))
                .context("missing required argument: --session-secret")?,
            cipher_secret: matches
                .get_one::<String>("cipher-secret")
                .map(|s| SecretString::from(s.clone()))
                .context("missing required argument: --cipher-secret")?,
            session_ttl_seconds: matches
                .get_one::<i64>("session-ttl-seconds")
                .copied()
                .unwrap_or(604_800),
            bcrypt_cost: matches
                .get_one::<u32>("bcrypt-cost")
                .copied()
                .unwrap_or(bcrypt::DEFAULT_COST),
            frontend_base_url: matches
                .get_one::<String>("frontend-base-url")
                .cloned()
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            landing_path: matches
                .get_one::<String>("landing-path")
                .cloned()
                .unwrap_or_else(|| "/dashboard".to_string()),
            login_path: matches
                .get_one::<String>("login-path")
                .cloned()
                .unwrap_or_else(|| "/login".to_string()),
            password_policy: PasswordPolicy {
                min_length: matches
                    .get_one::<usize>("password-min-length")
                    .copied()
                    .unwrap_or(8),
                require_digit: matches
                    .get_one::<bool>("password-require-digit")
                    .copied()
                    .unwrap_or(true),
                require_uppercase: matches
                    .get_one::<bool>("password-require-uppercase")
                    .copied()
                    .unwrap_or(true),
                require_special: matches
                    .get_one::<bool>("password-require-special")
                    .copied()
                    .unwrap_or(true),
            },
        })
    }
}

pub fn with_args(command: Command) -> Command {
    let command = with_secret_args(command);
    let command = with_session_args(command);
    with_password_policy_args(command)
}

fn with_secret_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("session-secret")
                .long("session-secret")
                .help("Secret used to sign session tokens")
                .env("VESTIBULE_SESSION_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("cipher-secret")
                .long("cipher-secret")
                .help("Shared secret of the password transport cipher")
                .long_help(
                    "Shared secret of the password transport cipher. The browser counterpart of this value is inherently readable by client code; the layer is defense in depth under TLS only.",
                )
                .env("VESTIBULE_CIPHER_SECRET")
                .required(true),
        )
}

fn with_session_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("session-ttl-seconds")
                .long("session-ttl-seconds")
                .help("Session token and cookie TTL in seconds")
                .env("VESTIBULE_SESSION_TTL_SECONDS")
                .default_value("604800")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("bcrypt-cost")
                .long("bcrypt-cost")
                .help("bcrypt cost factor for new password hashes")
                .env("VESTIBULE_BCRYPT_COST")
                .default_value("12")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("frontend-base-url")
                .long("frontend-base-url")
                .help("Front end base URL; sets the CORS origin and the Secure cookie flag")
                .env("VESTIBULE_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
        .arg(
            Arg::new("landing-path")
                .long("landing-path")
                .help("Redirect target after a successful signup or login")
                .env("VESTIBULE_LANDING_PATH")
                .default_value("/dashboard"),
        )
        .arg(
            Arg::new("login-path")
                .long("login-path")
                .help("Redirect target after logout")
                .env("VESTIBULE_LOGIN_PATH")
                .default_value("/login"),
        )
}

fn with_password_policy_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("password-min-length")
                .long("password-min-length")
                .help("Minimum password length for new accounts")
                .env("VESTIBULE_PASSWORD_MIN_LENGTH")
                .default_value("8")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("password-require-digit")
                .long("password-require-digit")
                .help("Require at least one digit in new passwords")
                .env("VESTIBULE_PASSWORD_REQUIRE_DIGIT")
                .default_value("true")
                .value_parser(clap::value_parser!(bool)),
        )
        .arg(
            Arg::new("password-require-uppercase")
                .long("password-require-uppercase")
                .help("Require at least one uppercase letter in new passwords")
                .env("VESTIBULE_PASSWORD_REQUIRE_UPPERCASE")
                .default_value("true")
                .value_parser(clap::value_parser!(bool)),
        )
        .arg(
            Arg::new("password-require-special")
                .long("password-require-special")
                .help("Require at least one special character in new passwords")
                .env("VESTIBULE_PASSWORD_REQUIRE_SPECIAL")
                .default_value("true")
                .value_parser(clap::value_parser!(bool)),
        )
}
