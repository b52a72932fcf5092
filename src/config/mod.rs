use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::scoring::AdjustmentMode;

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
    pub scoring: ScoringDefaults,
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

        let adjustment_mode = match env::var("APP_ADJUSTMENT_MODE") {
            Ok(raw) => parse_adjustment_mode(&raw)?,
            Err(_) => AdjustmentMode::default(),
        };
        let adjustment_range = match env::var("APP_ADJUSTMENT_RANGE") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidAdjustmentRange)?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringDefaults {
                adjustment_mode,
                adjustment_range,
            },
        })
    }
}

fn parse_adjustment_mode(raw: &str) -> Result<AdjustmentMode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "points" => Ok(AdjustmentMode::Points),
        "percent" => Ok(AdjustmentMode::Percent),
        _ => Err(ConfigError::InvalidAdjustmentMode {
            value: raw.to_string(),
        }),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Fallback scoring knobs applied when an inline evaluation payload does not
/// carry its own configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringDefaults {
    pub adjustment_mode: AdjustmentMode,
    pub adjustment_range: Option<f64>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAdjustmentMode { value: String },
    InvalidAdjustmentRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAdjustmentMode { value } => {
                write!(
                    f,
                    "APP_ADJUSTMENT_MODE must be 'points' or 'percent', got '{value}'"
                )
            }
            ConfigError::InvalidAdjustmentRange => {
                write!(f, "APP_ADJUSTMENT_RANGE must be a number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
