use serde::Deserialize;

use blueprint_auth::Role;
use blueprint_core::{DomainResult, Violations};
use blueprint_events::Command;

/// Sign-up request.
#[derive(Clone, Deserialize)]
pub struct UserRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl core::fmt::Debug for UserRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserRegistration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Command for UserRegistration {
    fn command_type(&self) -> &'static str {
        "users.register"
    }

    /// Username and email are checked as they will be stored, without
    /// surrounding whitespace.
    fn validate(&self) -> DomainResult<()> {
        let username = self.username.trim();
        let email = self.email.trim();
        let mut v = Violations::new();
        v.not_blank("username", username)
            .length("username", username, 4, 255)
            .not_blank("email", email)
            .email("email", email)
            .length("password", &self.password, 8, 30)
            .no_whitespace("password", &self.password)
            .required("role", &self.role);
        v.finish()
    }
}

/// Credential check that yields a bearer token.
#[derive(Clone, Deserialize)]
pub struct SignIn {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for SignIn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignIn")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Command for SignIn {
    fn command_type(&self) -> &'static str {
        "users.sign_in"
    }

    fn validate(&self) -> DomainResult<()> {
        let mut v = Violations::new();
        v.not_blank("username", self.username.trim())
            .not_blank("password", &self.password);
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::DomainError;
    use proptest::prelude::*;

    fn registration() -> UserRegistration {
        UserRegistration {
            username: "mrsmith".into(),
            email: "smith@school.test".into(),
            password: "password1".into(),
            role: Some(Role::Teacher),
        }
    }

    fn failing_fields(err: DomainError) -> Vec<String> {
        err.violations().iter().map(|v| v.field.clone()).collect()
    }

    #[test]
    fn valid_registration_passes() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let cmd = UserRegistration {
            username: "abc".into(),
            email: "not-an-email".into(),
            password: "short p".into(),
            role: None,
        };

        let fields = failing_fields(cmd.validate().unwrap_err());
        assert_eq!(fields, vec!["username", "email", "password", "password", "role"]);
    }

    #[test]
    fn blank_sign_in_names_both_fields() {
        let cmd = SignIn {
            username: " ".into(),
            password: String::new(),
        };
        assert_eq!(failing_fields(cmd.validate().unwrap_err()), vec!["username", "password"]);
    }

    #[test]
    fn debug_output_omits_password() {
        let rendered = format!("{:?}", registration());
        assert!(!rendered.contains("password1"));
    }

    proptest! {
        #[test]
        fn password_length_bounds(len in 0usize..40) {
            let cmd = UserRegistration { password: "x".repeat(len), ..registration() };
            let ok = cmd.validate().is_ok();
            prop_assert_eq!(ok, (8..=30).contains(&len));
        }
    }
}
