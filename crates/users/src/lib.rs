//! `blueprint-users`: registration and sign-in.
//!
//! Users are keyed by username. Other modules learn about new users through the
//! `UserRegistered` integration event and never read this module's storage.

pub mod commands;
pub mod handlers;
pub mod password;
pub mod user;

pub use commands::{SignIn, UserRegistration};
pub use handlers::{RegisterUserHandler, SignInHandler, SignedIn};
pub use password::PasswordHash;
pub use user::User;
