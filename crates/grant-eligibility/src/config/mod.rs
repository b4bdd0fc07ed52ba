//! Runtime settings read from `.env` and the process environment.

mod policy;

use crate::eligibility::EligibilityPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Development;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the service and the batch commands need at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub policy: EligibilityPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match var("APP_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            environment: AppEnvironment::parse(var("APP_ENV").as_deref()),
            server: ServerConfig {
                host: var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: var("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            policy: policy::from_env()?,
        })
    }
}

/// Reads a variable, treating unset and blank alike.
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = match self.host.trim() {
            host if host.eq_ignore_ascii_case("localhost") => IpAddr::V4(Ipv4Addr::LOCALHOST),
            host => host
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost { source })?,
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidVeniLowerBound {
        value: String,
    },
    InvalidMscaDeadline {
        value: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => f.write_str("APP_PORT must be a port number"),
            ConfigError::InvalidHost { source } => {
                write!(f, "APP_HOST must be an IP address or localhost ({source})")
            }
            ConfigError::InvalidVeniLowerBound { value } => write!(
                f,
                "ELIGIBILITY_VENI_LOWER_BOUND must be a number of years, got '{value}'"
            ),
            ConfigError::InvalidMscaDeadline { value, .. } => write!(
                f,
                "ELIGIBILITY_MSCA_DEADLINE must be a YYYY-MM-DD date, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidMscaDeadline { source, .. } => Some(source),
            ConfigError::InvalidPort | ConfigError::InvalidVeniLowerBound { .. } => None,
        }
    }
}
