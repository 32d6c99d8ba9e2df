//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the server action with its full
//! configuration state.

use crate::cli::{
    actions::{server::Args, Action},
    commands::auth,
};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        session_secret: auth_opts.session_secret,
        cipher_secret: auth_opts.cipher_secret,
        session_ttl_seconds: auth_opts.session_ttl_seconds,
        bcrypt_cost: auth_opts.bcrypt_cost,
        frontend_base_url: auth_opts.frontend_base_url,
        landing_path: auth_opts.landing_path,
        login_path: auth_opts.login_path,
        password_policy: auth_opts.password_policy,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_builds_the_server_action() {
        temp_env::with_vars(
            [
                (
                    "VESTIBULE_DSN",
                    Some("postgres://user@localhost:5432/vestibule"),
                ),
                ("VESTIBULE_SESSION_SECRET", Some("sign-me")),
                ("VESTIBULE_CIPHER_SECRET", Some("cipher-me")),
                ("VESTIBULE_PORT", Some("9090")),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["vestibule"]);
                let action = handler(&matches).expect("action should build");
                let Action::Server(args) = action;
                assert_eq!(args.port, 9090);
                assert_eq!(args.dsn, "postgres://user@localhost:5432/vestibule");
                assert_eq!(args.session_ttl_seconds, 604_800);
                assert_eq!(args.landing_path, "/dashboard");
                assert_eq!(args.login_path, "/login");
            },
        );
    }
}
