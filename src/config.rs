use crate::core::DEFAULT_MIN_QUERY_LEN;
use crate::models::GeoPoint;
use crate::services::GeolocationOptions;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub geolocation: GeolocationSettings,
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

/// Where the school list comes from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Re-fetch the list this often; unset fetches once at startup
    pub refresh_interval_secs: Option<u64>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            refresh_interval_secs: None,
        }
    }
}

fn default_api_url() -> String { "https://api.sendbeacon.com/team/schools".to_string() }
fn default_request_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
        }
    }
}

fn default_min_query_len() -> usize { DEFAULT_MIN_QUERY_LEN }

#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationSettings {
    #[serde(default = "default_true")]
    pub enable_high_accuracy: bool,
    #[serde(default = "default_geolocation_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub maximum_age_ms: u64,
    /// Position reported at startup; unset means the lookup is denied
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: default_geolocation_timeout_ms(),
            maximum_age_ms: 0,
            latitude: None,
            longitude: None,
        }
    }
}

fn default_true() -> bool { true }
fn default_geolocation_timeout_ms() -> u64 { 5000 }

impl GeolocationSettings {
    pub fn options(&self) -> GeolocationOptions {
        GeolocationOptions {
            enable_high_accuracy: self.enable_high_accuracy,
            timeout: Duration::from_millis(self.timeout_ms),
            maximum_age: Duration::from_millis(self.maximum_age_ms),
        }
    }

    /// Configured startup point, if both coordinates are set and in range
    pub fn point(&self) -> Option<GeoPoint> {
        let (latitude, longitude) = (self.latitude?, self.longitude?);
        match GeoPoint::new(latitude, longitude) {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::warn!("Ignoring configured position: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output style of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Unrecognised names fall back to compact text
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

impl LoggingSettings {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.format)
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with BEACON__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., BEACON__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("BEACON")
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
                Environment::with_prefix("BEACON")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// `SCHOOLS_API_URL` wins over any configured source URL
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("SCHOOLS_API_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("source.api_url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.source.api_url, "https://api.sendbeacon.com/team/schools");
        assert_eq!(settings.source.refresh_interval_secs, None);
        assert_eq!(settings.directory.min_query_len, 4);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "json");
        assert_eq!(settings.logging.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_names() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("plain"), LogFormat::Compact);
    }

    #[test]
    fn test_default_geolocation_options() {
        let options = GeolocationSettings::default().options();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert!(options.maximum_age.is_zero());
    }

    #[test]
    fn test_configured_point() {
        let mut geolocation = GeolocationSettings::default();
        assert_eq!(geolocation.point(), None);

        geolocation.latitude = Some(44.9);
        assert_eq!(geolocation.point(), None);

        geolocation.longitude = Some(-93.2);
        assert_eq!(geolocation.point(), Some(GeoPoint { latitude: 44.9, longitude: -93.2 }));

        geolocation.latitude = Some(120.0);
        assert_eq!(geolocation.point(), None);
    }

    #[test]
    fn test_empty_config_deserializes_to_defaults() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.geolocation.timeout_ms, 5000);
    }
}
