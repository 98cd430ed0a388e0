//! `tracing` subscriber installation.
//!
//! Filtering follows `RUST_LOG` and falls back to [`DEFAULT_DIRECTIVE`].
//! Output is JSON unless `LOG_FORMAT=compact` asks for human-readable lines.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::SystemTime;

pub const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("compact") => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

/// Install the global subscriber using `LOG_FORMAT` from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());
    init_with(format);
}

/// Install the global subscriber; returns `false` when one was already set.
pub fn init_with(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match format {
        LogFormat::Json => builder.json().with_timer(SystemTime).try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.is_ok()
}
