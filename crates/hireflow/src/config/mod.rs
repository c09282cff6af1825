use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::recruiting::matching::DEFAULT_MAJOR_CITIES;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let matching = match env::var("APP_MAJOR_CITIES") {
            Ok(raw) => MatchingConfig::from_list(&raw)?,
            Err(_) => MatchingConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Inputs for the location heuristic of the match scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingConfig {
    pub major_cities: Vec<String>,
}

impl MatchingConfig {
    /// Parses a comma-separated city list, ignoring blank entries.
    pub fn from_list(raw: &str) -> Result<Self, ConfigError> {
        let major_cities: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
            .collect();

        if major_cities.is_empty() {
            return Err(ConfigError::EmptyMajorCities);
        }

        Ok(Self { major_cities })
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            major_cities: DEFAULT_MAJOR_CITIES
                .iter()
                .map(|city| city.to_string())
                .collect(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyMajorCities,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyMajorCities => {
                write!(f, "APP_MAJOR_CITIES must list at least one city")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptyMajorCities => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
