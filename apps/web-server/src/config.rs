//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use sample_core::pagination::PageRequest;
use sample_infra::{DatabaseConfig, PasswordConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
    pub session: SessionConfig,
    pub per_page: u64,
    pub password: PasswordConfig,
    pub seed_sample_data: bool,
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
    /// Mark the cookie `Secure`; enable behind TLS.
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60 * 24 * 14),
            secure_cookie: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            run_migrations: false,
            session: SessionConfig::default(),
            per_page: PageRequest::DEFAULT_PER_PAGE,
            password: PasswordConfig::default(),
            seed_sample_data: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 100),
            min_connections: parse_var("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port),
            database,
            run_migrations: flag_var("RUN_MIGRATIONS", defaults.run_migrations),
            session: SessionConfig {
                ttl: Duration::from_secs(parse_var(
                    "SESSION_TTL_SECS",
                    defaults.session.ttl.as_secs(),
                )),
                secure_cookie: flag_var("SESSION_SECURE_COOKIE", false),
            },
            per_page: parse_var("PER_PAGE", defaults.per_page).max(1),
            password: PasswordConfig::from_env(),
            seed_sample_data: flag_var("SEED_SAMPLE_DATA", defaults.seed_sample_data),
        }
    }

    /// Configuration for tests: in-memory store, cheapest password hashing.
    pub fn for_tests() -> Self {
        Self {
            password: PasswordConfig::low_cost(),
            ..Self::default()
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn flag_var(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}
