//! Process configuration read from the environment (and `.env` when present).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub jwt_ttl: chrono::Duration,
    pub reconcile_period: Duration,
    pub reconcile_initial_delay: Duration,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_ttl: chrono::Duration::minutes(60),
            reconcile_period: Duration::from_secs(5),
            reconcile_initial_delay: Duration::ZERO,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Load from process environment; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {raw}"))?,
            None => defaults.bind_addr,
        };

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set; using insecure dev default");
            defaults.jwt_secret
        });

        let jwt_ttl = match parse_u64(&lookup, "JWT_TTL_MINUTES")? {
            Some(minutes) => {
                let minutes = i64::try_from(minutes).context("JWT_TTL_MINUTES is too large")?;
                chrono::Duration::try_minutes(minutes).context("JWT_TTL_MINUTES is too large")?
            }
            None => defaults.jwt_ttl,
        };

        let reconcile_period = parse_u64(&lookup, "RECONCILE_PERIOD_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.reconcile_period);
        anyhow::ensure!(!reconcile_period.is_zero(), "RECONCILE_PERIOD_SECS must be positive");

        let reconcile_initial_delay = parse_u64(&lookup, "RECONCILE_INITIAL_DELAY_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.reconcile_initial_delay);

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("SEED_DEMO_DATA must be true or false, got {raw}"))?,
            None => defaults.seed_demo_data,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            jwt_ttl,
            reconcile_period,
            reconcile_initial_delay,
            seed_demo_data,
        })
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("{key} must be a non-negative integer, got {raw}"))
        })
        .transpose()
}
