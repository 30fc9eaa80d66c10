//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.identikit.toml` files.

use crate::error::UnknownCountry;
use crate::generator::GeneratorSettings;
use crate::geo::CountryCode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Third-party API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Identity generation settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Third-party API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the Nominatim reverse-geocoding service.
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Base URL of the randomuser.me persona service.
    #[serde(default = "default_randomuser_url")]
    pub randomuser_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent to both services. Nominatim's usage policy
    /// requires an identifying value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            randomuser_url: default_randomuser_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_randomuser_url() -> String {
    "https://randomuser.me".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("identikit/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Identity generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Country used when the request does not specify one.
    #[serde(default = "default_country")]
    pub default_country: String,

    /// Maximum reverse-geocoding attempts per request.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Fixed pause between attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_country() -> String {
    "AU".to_string()
}

fn default_max_attempts() -> usize {
    100
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".identikit.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref bind) = args.bind {
            self.server.bind = bind.clone();
        }

        if let Some(ref country) = args.country {
            self.generator.default_country = country.clone();
        }

        if let Some(timeout) = args.timeout {
            self.upstream.timeout_seconds = timeout;
        }

        if let Some(max_attempts) = args.max_attempts {
            self.generator.max_attempts = max_attempts;
        }
    }

    /// The listen address, parsed.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.server.bind))
    }

    /// The configured default country, parsed.
    pub fn default_country(&self) -> Result<CountryCode, UnknownCountry> {
        self.generator.default_country.parse()
    }

    /// Map config onto the generator's settings struct.
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            nominatim_url: self.upstream.nominatim_url.clone(),
            randomuser_url: self.upstream.randomuser_url.clone(),
            user_agent: self.upstream.user_agent.clone(),
            timeout: Duration::from_secs(self.upstream.timeout_seconds),
            max_attempts: self.generator.max_attempts,
            retry_delay: Duration::from_millis(self.generator.retry_delay_ms),
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.generator.default_country, "AU");
        assert_eq!(config.generator.max_attempts, 100);
        assert_eq!(
            config.upstream.nominatim_url,
            "https://nominatim.openstreetmap.org"
        );
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:3000"

[upstream]
timeout_seconds = 5

[generator]
default_country = "CH"
max_attempts = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.upstream.timeout_seconds, 5);
        assert_eq!(config.generator.default_country, "CH");
        assert_eq!(config.generator.max_attempts, 10);
        // Unset fields keep their defaults
        assert_eq!(config.upstream.randomuser_url, "https://randomuser.me");
    }

    #[test]
    fn test_bind_addr_parsing() {
        let config = Config::default();
        assert!(config.bind_addr().is_ok());

        let mut bad = Config::default();
        bad.server.bind = "not-an-address".to_string();
        assert!(bad.bind_addr().is_err());
    }

    #[test]
    fn test_default_country_parsing() {
        let config = Config::default();
        assert_eq!(config.default_country().unwrap(), CountryCode::Au);

        let mut bad = Config::default();
        bad.generator.default_country = "ZZ".to_string();
        assert!(bad.default_country().is_err());
    }

    #[test]
    fn test_generator_settings_mapping() {
        let mut config = Config::default();
        config.upstream.timeout_seconds = 3;
        config.generator.retry_delay_ms = 250;

        let settings = config.generator_settings();
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.retry_delay, Duration::from_millis(250));
        assert_eq!(settings.max_attempts, 100);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[upstream]"));
        assert!(toml_str.contains("[generator]"));
    }
}
