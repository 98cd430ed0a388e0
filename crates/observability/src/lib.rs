//! Process-wide logging setup shared by the server binary and tests.

pub mod logging;

pub use logging::{DEFAULT_DIRECTIVE, LogFormat, init, init_with};
