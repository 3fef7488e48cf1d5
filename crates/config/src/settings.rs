//! Service settings
//!
//! Layered with the `config` crate, later layers winning:
//! 1. Built-in defaults (`Settings::default()`)
//! 2. TOML file: explicit path, `$PREDICTCARE_CONFIG`, or `config/default.toml` if present
//! 3. Environment: `PREDICTCARE__SECTION__KEY`, e.g. `PREDICTCARE__SERVER__PORT=8080`

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{env, limits, observability, server, service, timeouts};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_request_timeout_secs() -> u64 {
    timeouts::REQUEST_SECS
}

fn default_max_body_bytes() -> usize {
    limits::MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Listen address; `host` must be an IP literal
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::invalid("server.host", format!("{}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Cross-origin policy. `"*"` (the default) allows any origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// `tracing` filter directive; `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Expose Prometheus metrics on `metrics_path`
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

fn default_log_level() -> String {
    observability::LOG_LEVEL.to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_path() -> String {
    observability::METRICS_PATH.to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_enabled: default_metrics_enabled(),
            metrics_path: default_metrics_path(),
        }
    }
}

/// Text returned by the informational endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_health_message")]
    pub health_message: String,
}

fn default_service_name() -> String {
    service::NAME.to_string()
}

fn default_greeting() -> String {
    service::GREETING.to_string()
}

fn default_health_message() -> String {
    service::HEALTH_MESSAGE.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            greeting: default_greeting(),
            health_message: default_health_message(),
        }
    }
}

impl Settings {
    /// Load with the standard layering, honouring `$PREDICTCARE_CONFIG`
    pub fn load() -> Result<Self, ConfigError> {
        let mut loader = SettingsLoader::new();
        if let Ok(path) = std::env::var(env::CONFIG_PATH_VAR) {
            loader = loader.file(path);
        }
        loader.load()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;

        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "must be non-zero"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("server.request_timeout_secs", "must be non-zero"));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid("server.max_body_bytes", "must be non-zero"));
        }
        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::invalid(
                "cors.allowed_origins",
                "must list at least one origin (use \"*\" for any)",
            ));
        }
        if self.observability.log_level.trim().is_empty() {
            return Err(ConfigError::invalid("observability.log_level", "must not be empty"));
        }
        if !self.observability.metrics_path.starts_with('/') {
            return Err(ConfigError::invalid("observability.metrics_path", "must start with '/'"));
        }
        if self.observability.metrics_path == "/" || self.observability.metrics_path.starts_with("/api/") {
            return Err(ConfigError::invalid(
                "observability.metrics_path",
                "must not overlap the API routes",
            ));
        }

        Ok(())
    }

    /// Effective settings as TOML, for diagnostics
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Builder over the layered sources
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: Some(env::PREFIX.to_string()),
        }
    }

    /// Required TOML file; replaces the optional `config/default` lookup
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    pub fn load(self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        builder = match &self.file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration file");
                builder.add_source(File::from(path.as_path()).required(true))
            },
            None => builder.add_source(File::with_name(env::DEFAULT_CONFIG_FILE).required(false)),
        };

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator(env::SEPARATOR)
                    .separator(env::SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            );
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5328);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert!(settings.cors.allows_any());
        assert_eq!(settings.service.health_message, "PredictCare API is running");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_without_sources_yields_defaults() {
        let settings = SettingsLoader::new().without_env().load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            [server]
            port = 8080

            [cors]
            allowed_origins = ["https://predictcare.example"]

            [observability]
            log_format = "json"
            "#,
        );

        let settings = SettingsLoader::new().without_env().file(file.path()).load().unwrap();
        assert_eq!(settings.server.port, 8080);
        // Untouched keys keep their defaults
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.cors.allowed_origins, vec!["https://predictcare.example"]);
        assert!(!settings.cors.allows_any());
        assert_eq!(settings.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("[server]\nport = 8080\n");
        std::env::set_var("PCTEST_ENV_OVERRIDE__SERVER__PORT", "9090");
        std::env::set_var("PCTEST_ENV_OVERRIDE__CORS__ALLOWED_ORIGINS", "https://a.example,https://b.example");

        let settings = SettingsLoader::new()
            .env_prefix("PCTEST_ENV_OVERRIDE")
            .file(file.path())
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(
            settings.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );

        std::env::remove_var("PCTEST_ENV_OVERRIDE__SERVER__PORT");
        std::env::remove_var("PCTEST_ENV_OVERRIDE__CORS__ALLOWED_ORIGINS");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = SettingsLoader::new()
            .without_env()
            .file("/nonexistent/predictcare.toml")
            .load();
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "server.port", .. })
        ));

        let mut settings = Settings::default();
        settings.server.host = "localhost".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "server.host", .. })
        ));

        let mut settings = Settings::default();
        settings.cors.allowed_origins.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.observability.metrics_path = "/api/health".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid {
                field: "observability.metrics_path",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_file_value_fails_validation() {
        let file = toml_file("[server]\nrequest_timeout_secs = 0\n");
        let result = SettingsLoader::new().without_env().file(file.path()).load();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "server.request_timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn test_to_toml_round_trips_through_loader() {
        let mut settings = Settings::default();
        settings.server.port = 7000;
        settings.service.greeting = "hello".to_string();

        let file = toml_file(&settings.to_toml().unwrap());
        let loaded = SettingsLoader::new().without_env().file(file.path()).load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_socket_addr() {
        let settings = Settings::default();
        assert_eq!(settings.server.socket_addr().unwrap(), "127.0.0.1:5328".parse::<SocketAddr>().unwrap());
    }
}
