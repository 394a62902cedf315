use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::scoring::ScoreScale;

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
    pub scoring: ScoringConfig,
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
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
            Err(_) => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            scoring: ScoringConfig::from_env()?,
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

/// Output layout for the fmt subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Scoring defaults applied when a request does not pick its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub default_scale: ScoreScale,
    /// Market base interest rate in percent.
    pub base_interest_rate: f64,
    /// Eligibility threshold, expressed on `default_scale`.
    pub minimum_score: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_scale: ScoreScale::Comprehensive,
            base_interest_rate: 8.0,
            minimum_score: default_minimum_score(ScoreScale::Comprehensive),
        }
    }
}

fn default_minimum_score(scale: ScoreScale) -> u32 {
    match scale {
        ScoreScale::Comprehensive => 60,
        ScoreScale::Legacy => 500,
    }
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_scale = match env::var("TRUST_DEFAULT_SCALE") {
            Ok(raw) => raw
                .parse::<ScoreScale>()
                .map_err(|_| ConfigError::InvalidScale(raw))?,
            Err(_) => ScoreScale::Comprehensive,
        };

        let base_interest_rate = match env::var("TRUST_BASE_RATE") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rate| rate.is_finite() && *rate >= 0.0)
                .ok_or(ConfigError::InvalidBaseRate)?,
            Err(_) => 8.0,
        };

        let minimum_score = match env::var("TRUST_MIN_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|score| default_scale.contains(*score))
                .ok_or(ConfigError::InvalidMinimumScore {
                    scale: default_scale,
                })?,
            Err(_) => default_minimum_score(default_scale),
        };

        Ok(Self {
            default_scale,
            base_interest_rate,
            minimum_score,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidScale(String),
    InvalidBaseRate,
    InvalidMinimumScore { scale: ScoreScale },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(raw) => {
                write!(f, "APP_LOG_FORMAT '{raw}' must be 'compact' or 'pretty'")
            }
            ConfigError::InvalidScale(raw) => write!(
                f,
                "TRUST_DEFAULT_SCALE '{raw}' must be 'comprehensive' or 'legacy'"
            ),
            ConfigError::InvalidBaseRate => {
                write!(f, "TRUST_BASE_RATE must be a non-negative number")
            }
            ConfigError::InvalidMinimumScore { scale } => {
                let (low, high) = scale.range();
                write!(
                    f,
                    "TRUST_MIN_SCORE must be an integer between {low} and {high} for the {} scale",
                    scale.label()
                )
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
