//! Infrastructure layer: configuration, wiring, background workers and jobs.

pub mod config;
pub mod demo;
pub mod jobs;
pub mod reactions;
pub mod runtime;
pub mod services;
pub mod simulated_devices;
pub mod workers;

mod integration_tests;

pub use config::AppConfig;
pub use runtime::{Runtime, bootstrap};
pub use services::AppServices;
