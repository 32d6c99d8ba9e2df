//! Pure field validation for the signup and login forms.
//!
//! Validation performs no I/O. All violations for one field are collected in
//! order; fields are independent of each other.

use regex::Regex;
use std::collections::BTreeMap;

const MAX_NAME_LENGTH: usize = 100;

/// Normalize an email for lookup/uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
#[must_use]
pub fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

/// Required character classes for new passwords.
#[derive(Clone, Debug)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_uppercase: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_digit: true,
            require_uppercase: true,
            require_special: true,
        }
    }
}

/// Field name to ordered violation messages. Transient, one per attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

/// Signup fields that passed validation, normalized for storage.
#[derive(Debug)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login fields that passed validation.
#[derive(Debug)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

/// Validate raw signup fields against the password policy.
///
/// # Errors
/// Returns the field-keyed violation messages when any field is invalid.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    policy: &PasswordPolicy,
) -> Result<SignupData, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = name.trim();
    if name.is_empty() {
        errors.push("name", "Name is required.");
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.push("name", "Name must be 100 characters or fewer.");
    }

    let email = normalize_email(email);
    if !valid_email(&email) {
        errors.push("email", "Please enter a valid email address.");
    }

    check_password_policy(password, policy, &mut errors);

    if errors.is_empty() {
        Ok(SignupData {
            name: name.to_string(),
            email,
            password: password.to_string(),
        })
    } else {
        Err(errors)
    }
}

/// Validate raw login fields.
///
/// The password policy is not applied here: accounts created under an older
/// policy must still be able to log in.
///
/// # Errors
/// Returns the field-keyed violation messages when any field is invalid.
pub fn validate_login(email: &str, password: &str) -> Result<LoginData, FieldErrors> {
    let mut errors = FieldErrors::default();

    let email = normalize_email(email);
    if !valid_email(&email) {
        errors.push("email", "Please enter a valid email address.");
    }

    if password.is_empty() {
        errors.push("password", "Password is required.");
    }

    if errors.is_empty() {
        Ok(LoginData {
            email,
            password: password.to_string(),
        })
    } else {
        Err(errors)
    }
}

fn check_password_policy(password: &str, policy: &PasswordPolicy, errors: &mut FieldErrors) {
    if password.chars().count() < policy.min_length {
        errors.push(
            "password",
            &format!(
                "Password must be at least {} characters long.",
                policy.min_length
            ),
        );
    }
    if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password", "Password must contain at least one digit.");
    }
    if policy.require_uppercase && !password.chars().any(char::is_uppercase) {
        errors.push(
            "password",
            "Password must contain at least one uppercase letter.",
        );
    }
    if policy.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        errors.push(
            "password",
            "Password must contain at least one special character.",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
    }

    #[test]
    fn signup_passes_with_a_conforming_password() {
        let result = validate_signup(
            "Alice",
            "alice@example.com",
            "Str0ng!pass",
            &PasswordPolicy::default(),
        );
        let data = result.expect("expected validation to pass");
        assert_eq!(data.name, "Alice");
        assert_eq!(data.email, "alice@example.com");
    }

    #[test]
    fn short_password_reports_the_minimum_length() {
        let errors = validate_signup(
            "Alice",
            "alice@example.com",
            "short",
            &PasswordPolicy::default(),
        )
        .expect_err("expected validation to fail");
        assert!(
            errors
                .messages("password")
                .iter()
                .any(|m| m.contains("at least 8 characters"))
        );
    }

    #[test]
    fn password_violations_are_collected_not_fail_fast() {
        let errors = validate_signup(
            "Alice",
            "alice@example.com",
            "abc",
            &PasswordPolicy::default(),
        )
        .expect_err("expected validation to fail");
        // length, digit, uppercase, and special class all missing
        assert_eq!(errors.messages("password").len(), 4);
    }

    #[test]
    fn fields_fail_independently() {
        let errors = validate_signup("", "nope", "Str0ng!pass", &PasswordPolicy::default())
            .expect_err("expected validation to fail");
        assert_eq!(errors.messages("name"), ["Name is required."]);
        assert_eq!(
            errors.messages("email"),
            ["Please enter a valid email address."]
        );
        assert!(errors.messages("password").is_empty());
    }

    #[test]
    fn name_length_is_capped() {
        let long_name = "x".repeat(101);
        let errors = validate_signup(
            &long_name,
            "alice@example.com",
            "Str0ng!pass",
            &PasswordPolicy::default(),
        )
        .expect_err("expected validation to fail");
        assert_eq!(errors.messages("name"), ["Name must be 100 characters or fewer."]);
    }

    #[test]
    fn relaxed_policy_skips_disabled_classes() {
        let policy = PasswordPolicy {
            min_length: 4,
            require_digit: false,
            require_uppercase: false,
            require_special: false,
        };
        assert!(validate_signup("Alice", "alice@example.com", "word", &policy).is_ok());
    }

    #[test]
    fn login_only_requires_a_present_password() {
        assert!(validate_login("alice@example.com", "short").is_ok());
        let errors =
            validate_login("alice@example.com", "").expect_err("expected validation to fail");
        assert_eq!(errors.messages("password"), ["Password is required."]);
    }
}
