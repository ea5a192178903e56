//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use waypost_core::query::DEFAULT_MAX_LIMIT;
use waypost_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Upper bound on `limit` for listing requests.
    pub list_max_limit: u64,
    /// Directory holding locally stored images.
    pub media_dir: PathBuf,
    /// Time a client gets to send request headers.
    pub request_timeout: Duration,
    /// Seed the in-memory store with sample posts when no database is set.
    pub seed_demo_posts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            list_max_limit: DEFAULT_MAX_LIMIT,
            media_dir: PathBuf::from("./uploads"),
            request_timeout: Duration::from_secs(30),
            seed_demo_posts: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_env("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_env("DB_MIN_CONNECTIONS").unwrap_or(10),
            connect_timeout: Duration::from_secs(parse_env("DB_CONNECT_TIMEOUT_SECS").unwrap_or(10)),
        });

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT").unwrap_or(defaults.port),
            database,
            list_max_limit: parse_env::<u64>("LIST_MAX_LIMIT")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.list_max_limit),
            media_dir: env::var("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.media_dir),
            request_timeout: parse_env("REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            seed_demo_posts: env::var("SEED_DEMO_POSTS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.seed_demo_posts),
        }
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
