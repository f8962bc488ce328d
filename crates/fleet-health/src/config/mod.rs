use crate::health::{HealthConfig, ThresholdError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

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
    pub health: HealthConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            health: load_health_config()?,
        })
    }
}

/// Engine thresholds, each overridable through a `FLEET_*` variable.
fn load_health_config() -> Result<HealthConfig, ConfigError> {
    let defaults = HealthConfig::default();

    let safety_critical_item_keys = match env::var("FLEET_SAFETY_CRITICAL_ITEMS") {
        Ok(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => defaults.safety_critical_item_keys.clone(),
    };

    let config = HealthConfig {
        inspection_warning_multiplier: env_or(
            "FLEET_INSPECTION_WARNING_MULTIPLIER",
            defaults.inspection_warning_multiplier,
        )?,
        inspection_critical_multiplier: env_or(
            "FLEET_INSPECTION_CRITICAL_MULTIPLIER",
            defaults.inspection_critical_multiplier,
        )?,
        recurring_failure_window: env_or(
            "FLEET_RECURRING_FAILURE_WINDOW",
            defaults.recurring_failure_window,
        )?,
        recurring_failure_threshold: env_or(
            "FLEET_RECURRING_FAILURE_THRESHOLD",
            defaults.recurring_failure_threshold,
        )?,
        recent_failure_window_days: env_or(
            "FLEET_RECENT_FAILURE_WINDOW_DAYS",
            defaults.recent_failure_window_days,
        )?,
        safety_critical_item_keys,
        service_warning_days: env_or("FLEET_SERVICE_WARNING_DAYS", defaults.service_warning_days)?,
        service_critical_days: env_or(
            "FLEET_SERVICE_CRITICAL_DAYS",
            defaults.service_critical_days,
        )?,
        odometer_gap_warning_km: env_or(
            "FLEET_ODOMETER_GAP_WARNING_KM",
            defaults.odometer_gap_warning_km,
        )?,
    };

    config.validate().map_err(ConfigError::InvalidThresholds)?;
    Ok(config)
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key }),
        Err(_) => Ok(default),
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: &'static str },
    InvalidThresholds(ThresholdError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key } => write!(f, "{key} has an unparseable value"),
            ConfigError::InvalidThresholds(err) => write!(f, "invalid health thresholds: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidThresholds(err) => Some(err),
        }
    }
}
