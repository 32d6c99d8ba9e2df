use secrecy::SecretString;

/// Secrets shared with every handler. Never printed.
#[derive(Clone)]
pub struct GlobalArgs {
    session_secret: SecretString,
    cipher_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(session_secret: SecretString, cipher_secret: SecretString) -> Self {
        Self {
            session_secret,
            cipher_secret,
        }
    }

    #[must_use]
    pub fn session_secret(&self) -> &SecretString {
        &self.session_secret
    }

    #[must_use]
    pub fn cipher_secret(&self) -> &SecretString {
        &self.cipher_secret
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("session_secret", &"***")
            .field("cipher_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            SecretString::from("sign-me"),
            SecretString::from("cipher-me"),
        );
        assert_eq!(args.session_secret().expose_secret(), "sign-me");
        assert_eq!(args.cipher_secret().expose_secret(), "cipher-me");
    }

    #[test]
    fn debug_output_is_redacted() {
        let args = GlobalArgs::new(
            SecretString::from("sign-me"),
            SecretString::from("cipher-me"),
        );
        let printed = format!("{args:?}");
        assert!(!printed.contains("sign-me"));
        assert!(!printed.contains("cipher-me"));
    }
}
