use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::roster::FetchMethod;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub roster: RosterConfig,
    pub cache: CacheConfig,
    pub refresh: RefreshConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Attendance CSV source file.
    pub csv_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Remote XML directory location.
    pub url: String,
    pub method: FetchMethod,
    /// Local path the downloaded document is persisted to.
    pub xml_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Zero disables caching; every call recomputes.
    pub ttl_seconds: u64,
    pub enabled: bool,
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// Cron-like field patterns for the background roster refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    pub day_of_week: String,
    pub hour: String,
    pub minute: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` into a `Settings`. Environment variables take
    /// precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8690)?
            .set_default("data.csv_path", "runtime/data/presence.csv")?
            .set_default("roster.url", "http://localhost/users.xml")?
            .set_default("roster.method", "get")?
            .set_default("roster.xml_path", "runtime/data/roster.xml")?
            .set_default("cache.ttl_seconds", 600)?
            .set_default("cache.enabled", true)?
            .set_default("refresh.day_of_week", "*")?
            .set_default("refresh.hour", "*/4")?
            .set_default("refresh.minute", "0")?
            .set_default("logging.level", "info")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
