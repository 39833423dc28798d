// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::AppError;

/// Answer slots on an authored question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Time limit preset on a new draft, in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 10;

/// Quiz-time seconds consumed per timer tick.
pub const SECONDS_PER_TICK: u32 = 1;

/// `DATABASE_URL` value selecting the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    /// Wall-clock interval between timer ticks.
    pub timer_tick: Duration,
    /// How long a submitted session stays reachable before eviction.
    pub session_retention: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://quiz.db?mode=rwc".to_string(),
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            timer_tick: Duration::from_secs(1),
            session_retention: Duration::from_secs(3600),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let bind_address = match env::var("BIND_ADDRESS") {
            Ok(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                AppError::InternalServerError(format!("Invalid BIND_ADDRESS '{}': {}", raw, e))
            })?,
            Err(_) => defaults.bind_address,
        };

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let log_dir = env::var("LOG_DIR").unwrap_or(defaults.log_dir);

        let timer_tick = match env::var("TIMER_TICK_MILLIS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(AppError::InternalServerError(format!(
                        "Invalid TIMER_TICK_MILLIS '{}': expected a positive integer",
                        raw
                    )));
                }
            },
            Err(_) => defaults.timer_tick,
        };

        let session_retention = match env::var("SESSION_RETENTION_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                AppError::InternalServerError(format!(
                    "Invalid SESSION_RETENTION_SECS '{}': {}",
                    raw, e
                ))
            })?,
            Err(_) => defaults.session_retention,
        };

        Ok(Self {
            database_url,
            bind_address,
            rust_log,
            log_dir,
            timer_tick,
            session_retention,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}
