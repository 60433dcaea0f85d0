use std::num::NonZeroU32;
use std::time::Duration;

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allow_all: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Stored references resolve to permanent public URLs.
    #[default]
    Public,
    /// Stored references resolve to HMAC-signed URLs that expire.
    Signed,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub base_url: String,
    pub signing_secret: Option<String>,
    #[serde(default = "default_url_ttl")]
    pub url_ttl_secs: u64,
    /// Local directory served under `/media/`. Unset means media lives elsewhere.
    pub media_root: Option<String>,
}

fn default_url_ttl() -> u64 {
    3600
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Public,
            base_url: "http://localhost:8080/media".to_string(),
            signing_secret: None,
            url_ttl_secs: default_url_ttl(),
            media_root: None,
        }
    }
}

/// Rates use the `"<count>/<unit>"` form, e.g. `"5/minute"` or `"1000/day"`.
/// A missing rate disables that throttle.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ThrottleConfig {
    pub anon: Option<String>,
    pub submissions: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleRate {
    pub requests: NonZeroU32,
    pub per: Duration,
}

impl ThrottleRate {
    pub fn parse(rate: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::Message(format!("Invalid throttle rate: {}", rate));

        let (count, unit) = rate.trim().split_once('/').ok_or_else(invalid)?;
        let requests = count
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(invalid)?;

        let per = match unit.trim().chars().next() {
            Some('s') => Duration::from_secs(1),
            Some('m') => Duration::from_secs(60),
            Some('h') => Duration::from_secs(60 * 60),
            Some('d') => Duration::from_secs(24 * 60 * 60),
            _ => return Err(invalid()),
        };

        Ok(Self { requests, per })
    }
}

impl ThrottleConfig {
    pub fn anon_rate(&self) -> Result<Option<ThrottleRate>, ConfigError> {
        self.anon.as_deref().map(ThrottleRate::parse).transpose()
    }

    pub fn submissions_rate(&self) -> Result<Option<ThrottleRate>, ConfigError> {
        self.submissions.as_deref().map(ThrottleRate::parse).transpose()
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("server.debug", false)?
            .set_default("database.url", "sqlite://bookland.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("storage.backend", "public")?
            .set_default("storage.base_url", "http://localhost:8080/media")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with BOOKLAND__ prefix, double underscore separates levels)
            .add_source(
                Environment::with_prefix("BOOKLAND")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )

            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Signed && self.storage.signing_secret.is_none() {
            return Err(ConfigError::Message(
                "storage.signing_secret is required for the signed storage backend".to_string(),
            ));
        }
        self.throttle.anon_rate()?;
        self.throttle.submissions_rate()?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
                debug: false,
            },
            database: DatabaseConfig {
                url: "sqlite://bookland.db?mode=rwc".to_string(),
                max_connections: 10,
            },
            cors: CorsConfig::default(),
            storage: StorageConfig::default(),
            throttle: ThrottleConfig::default(),
        }
    }
}
