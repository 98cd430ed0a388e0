use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use blueprint_auth::{Hs256JwtValidator, Principal, Role, Username};
use blueprint_core::{DomainError, DomainResult, Repository};
use blueprint_events::{Command, CommandHandler, EventBus, IntegrationEnvelope, IntegrationEvent, publish_or_warn};

use crate::commands::{SignIn, UserRegistration};
use crate::user::User;

/// Registers a new account and announces it to the other modules.
///
/// Runs for anonymous callers; there is no role predicate.
pub struct RegisterUserHandler<R, B> {
    users: R,
    bus: B,
}

impl<R, B> RegisterUserHandler<R, B> {
    pub fn new(users: R, bus: B) -> Self {
        Self { users, bus }
    }
}

impl<R, B> CommandHandler<UserRegistration> for RegisterUserHandler<R, B>
where
    R: Repository<User>,
    B: EventBus<IntegrationEnvelope>,
{
    type Output = Username;

    fn handle(&self, _principal: &Principal, command: UserRegistration) -> DomainResult<Username> {
        command.validate()?;

        let username = Username::new(command.username.trim());
        // validate() guarantees the role is present
        let role = command.role.ok_or_else(|| DomainError::validation("role must not be null"))?;
        let user = User::register(username.clone(), command.email.trim().to_string(), role, &command.password);
        let user = self
            .users
            .insert_unless(user, &|_| false)?
            .ok_or_else(|| DomainError::conflict(format!("username {username} is already taken")))?;

        publish_or_warn(
            &self.bus,
            "users",
            IntegrationEvent::UserRegistered {
                username: user.username.clone(),
                email: user.email.clone(),
                role: user.role,
                occurred_at: Utc::now(),
            },
        );

        Ok(user.username)
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedIn {
    pub token: String,
    pub username: Username,
    pub role: Role,
}

/// Verifies credentials and issues a bearer token.
pub struct SignInHandler<R> {
    users: R,
    jwt: Arc<Hs256JwtValidator>,
    ttl: chrono::Duration,
}

impl<R> SignInHandler<R> {
    pub fn new(users: R, jwt: Arc<Hs256JwtValidator>, ttl: chrono::Duration) -> Self {
        Self { users, jwt, ttl }
    }
}

impl<R> CommandHandler<SignIn> for SignInHandler<R>
where
    R: Repository<User>,
{
    type Output = SignedIn;

    fn handle(&self, _principal: &Principal, command: SignIn) -> DomainResult<SignedIn> {
        command.validate()?;

        // Unknown user and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_id(&Username::new(command.username.trim()))?
            .filter(|user| user.password_matches(&command.password))
            .ok_or(DomainError::Unauthenticated)?;

        let token = self
            .jwt
            .issue(&user.principal(), Utc::now(), self.ttl)
            .map_err(|e| DomainError::storage(format!("token signing failed: {e}")))?;

        info!(username = %user.username, role = %user.role, "user signed in");

        Ok(SignedIn {
            token,
            username: user.username,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_auth::JwtValidator;
    use blueprint_core::InMemoryRepository;
    use blueprint_events::{InMemoryEventBus, execute};

    type Users = InMemoryRepository<User>;

    fn bus() -> Arc<InMemoryEventBus<IntegrationEnvelope>> {
        Arc::new(InMemoryEventBus::new())
    }

    fn registration(username: &str) -> UserRegistration {
        UserRegistration {
            username: username.into(),
            email: format!("{username}@school.test"),
            password: "password1".into(),
            role: Some(Role::Student),
        }
    }

    #[test]
    fn registration_saves_and_publishes() {
        let users = Arc::new(Users::default());
        let bus = bus();
        let sub = bus.subscribe();
        let handler = RegisterUserHandler::new(users.clone(), bus.clone());

        let username = execute(&handler, &Principal::anonymous(), registration("alice")).unwrap();

        assert_eq!(username.as_str(), "alice");
        assert!(users.exists(&username).unwrap());
        assert!(matches!(
            sub.try_recv().unwrap().payload(),
            IntegrationEvent::UserRegistered { role: Role::Student, .. }
        ));
    }

    #[test]
    fn taken_username_is_a_conflict() {
        let users = Arc::new(Users::default());
        let handler = RegisterUserHandler::new(users, bus());

        handler.handle(&Principal::anonymous(), registration("alice")).unwrap();
        let err = handler.handle(&Principal::anonymous(), registration("alice")).unwrap_err();

        assert_eq!(err.code(), "conflict");
    }

    #[test]
    fn padded_short_username_is_rejected_and_padded_valid_one_is_stored_trimmed() {
        let users = Arc::new(Users::default());
        let handler = RegisterUserHandler::new(users.clone(), bus());

        let err = handler
            .handle(
                &Principal::anonymous(),
                UserRegistration {
                    username: "   ab   ".into(),
                    ..registration("abcd")
                },
            )
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "username");
        assert!(users.is_empty());

        let username = handler
            .handle(
                &Principal::anonymous(),
                UserRegistration {
                    username: "  alice  ".into(),
                    ..registration("alice")
                },
            )
            .unwrap();
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn sign_in_issues_a_verifiable_token() {
        let users = Arc::new(Users::default());
        let jwt = Arc::new(Hs256JwtValidator::new("secret"));
        RegisterUserHandler::new(users.clone(), bus())
            .handle(&Principal::anonymous(), registration("alice"))
            .unwrap();

        let signed_in = SignInHandler::new(users, jwt.clone(), chrono::Duration::minutes(5))
            .handle(
                &Principal::anonymous(),
                SignIn {
                    username: "alice".into(),
                    password: "password1".into(),
                },
            )
            .unwrap();

        let claims = jwt.validate(&signed_in.token, Utc::now()).unwrap();
        assert_eq!(claims.principal(), Principal::new("alice", Role::Student));
    }

    #[test]
    fn wrong_password_and_unknown_user_are_unauthenticated() {
        let users = Arc::new(Users::default());
        RegisterUserHandler::new(users.clone(), bus())
            .handle(&Principal::anonymous(), registration("alice"))
            .unwrap();
        let handler = SignInHandler::new(
            users,
            Arc::new(Hs256JwtValidator::new("secret")),
            chrono::Duration::minutes(5),
        );

        for (username, password) in [("alice", "wrong-pass"), ("bob", "password1")] {
            let err = handler
                .handle(
                    &Principal::anonymous(),
                    SignIn {
                        username: username.into(),
                        password: password.into(),
                    },
                )
                .unwrap_err();
            assert_eq!(err, DomainError::Unauthenticated);
        }
    }
}
