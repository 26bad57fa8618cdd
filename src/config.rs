use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Upstream CROUStillant API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub version: String,
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            version: default_api_version(),
            timeout_secs: default_api_timeout(),
        }
    }
}

fn default_api_base_url() -> String { "https://api.croustillant.menu".to_string() }
fn default_api_version() -> String { "v1".to_string() }
fn default_api_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis is optional; without it only the in-process cache is used
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationSettings {
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

fn default_per_page() -> usize { crate::core::DEFAULT_PER_PAGE }
fn default_max_per_page() -> usize { 100 }

/// Time zone the restaurant schedules are written in
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> Tz { chrono_tz::Europe::Paris }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
/// Output format of the tracing subscriber; unknown values fail to load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CROUS_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CROUS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CROUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CROUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }
}

/// Apply conventional unprefixed variables on top of the layered config
///
/// `DATABASE_URL`, `REDIS_URL`, `EXPO_PUBLIC_API_*` and `LOG_LEVEL`/`LOG_FORMAT`
/// are honored so the service can share an `.env` with the mobile app.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }
    if let Ok(base_url) = env::var("EXPO_PUBLIC_API_BASE_URL") {
        builder = builder.set_override("api.base_url", base_url)?;
    }
    if let Ok(version) = env::var("EXPO_PUBLIC_API_VERSION") {
        builder = builder.set_override("api.version", version)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_api_settings() {
        let api = ApiSettings::default();
        assert_eq!(api.base_url, "https://api.croustillant.menu");
        assert_eq!(api.version, "v1");
        assert_eq!(api.timeout_secs, 30);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Json);
    }

    fn settings_from(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_log_format_values() {
        let settings = settings_from(
            r#"
            [database]
            url = "postgres://localhost/croustillant"

            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();
        assert_eq!(settings.logging.format, LogFormat::Pretty);

        let unknown = settings_from(
            r#"
            [database]
            url = "postgres://localhost/croustillant"

            [logging]
            format = "xml"
            "#,
        );
        assert!(unknown.is_err());
    }

    #[test]
    fn test_schedule_timezone() {
        let settings = settings_from(
            r#"
            [database]
            url = "postgres://localhost/croustillant"

            [schedule]
            timezone = "America/Martinique"
            "#,
        )
        .unwrap();
        assert_eq!(settings.schedule.timezone, chrono_tz::America::Martinique);

        let invalid = settings_from(
            r#"
            [database]
            url = "postgres://localhost/croustillant"

            [schedule]
            timezone = "Europe/Nowhere"
            "#,
        );
        assert!(invalid.is_err());
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgres://localhost/croustillant"

                [pagination]
                per_page = 10
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.pagination.per_page, 10);
        assert_eq!(settings.pagination.max_per_page, 100);
        assert!(settings.cache.redis_url.is_none());
        assert_eq!(settings.schedule.timezone, chrono_tz::Europe::Paris);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }
}
