//! Application configuration structs
//!
//! Loads configuration from environment variables, with a `.env` file
//! picked up if present. Every knob has a default so the server boots
//! with no configuration at all.

use std::env;
use std::time::Duration;

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub lifecycle: LifecycleConfig,
    pub importer: ImporterConfig,
    pub storage: StorageConfig,
    pub map: MapConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Path to the SQLite database file; `:memory:` for an in-memory store
    pub path: String,
}

/// Bubble lifecycle timing
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Inactivity window after which a user bubble expires
    pub retention_hours: u64,
    /// How often the expiry sweep runs
    pub sweep_interval_secs: u64,
    /// How often the decay heartbeat is broadcast to live viewers
    pub heartbeat_secs: u64,
}

impl LifecycleConfig {
    /// Retention window as a chrono duration
    #[must_use]
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::hours(self.retention_hours as i64)
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    #[must_use]
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }
}

/// Bot importer configuration
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Interval between import cycles
    pub interval_secs: u64,
    /// Delay before the first import after startup
    pub startup_delay_secs: u64,
    /// Per-source fetch timeout so one stuck source cannot stall a cycle
    pub source_timeout_secs: u64,
    /// Coordinate tolerance (degrees) when deduplicating bot events
    pub dedup_epsilon_deg: f64,
    /// Base URL of the geocoding service
    pub geocoder_base_url: String,
}

impl ImporterConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    #[must_use]
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

/// Media upload storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: String,
    pub max_upload_mb: u64,
}

impl StorageConfig {
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_mb as usize) * 1024 * 1024
    }
}

/// Map center and service radius
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    /// User bubbles farther than this are eligible for the distant purge
    pub max_radius_km: f64,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Exact allowed origins; empty means permissive
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "bubblemap".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PATH: &str = "bubbles.db";
const DEFAULT_RETENTION_HOURS: u64 = 24;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;
const DEFAULT_HEARTBEAT_SECS: u64 = 30;
const DEFAULT_IMPORT_INTERVAL_SECS: u64 = 1800;
const DEFAULT_IMPORT_STARTUP_DELAY_SECS: u64 = 5;
const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DEDUP_EPSILON_DEG: f64 = 0.001;
const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_MAX_UPLOAD_MB: u64 = 50;
// Amsterdam centre
const DEFAULT_MAP_CENTER_LAT: f64 = 52.3676;
const DEFAULT_MAP_CENTER_LNG: f64 = 4.9041;
const DEFAULT_MAP_MAX_RADIUS_KM: f64 = 50.0;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a set variable fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("SERVER_PORT", DEFAULT_PORT)?,
            },
            database: DatabaseSettings {
                path: env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            },
            lifecycle: LifecycleConfig {
                retention_hours: parse_var("RETENTION_HOURS", DEFAULT_RETENTION_HOURS)?,
                sweep_interval_secs: parse_var("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?,
                heartbeat_secs: parse_var("HEARTBEAT_SECS", DEFAULT_HEARTBEAT_SECS)?,
            },
            importer: ImporterConfig {
                interval_secs: parse_var("IMPORT_INTERVAL_SECS", DEFAULT_IMPORT_INTERVAL_SECS)?,
                startup_delay_secs: parse_var(
                    "IMPORT_STARTUP_DELAY_SECS",
                    DEFAULT_IMPORT_STARTUP_DELAY_SECS,
                )?,
                source_timeout_secs: parse_var("SOURCE_TIMEOUT_SECS", DEFAULT_SOURCE_TIMEOUT_SECS)?,
                dedup_epsilon_deg: parse_var("DEDUP_EPSILON_DEG", DEFAULT_DEDUP_EPSILON_DEG)?,
                geocoder_base_url: env::var("GEOCODER_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEOCODER_BASE_URL.to_string()),
            },
            storage: StorageConfig {
                upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
                max_upload_mb: parse_var("MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?,
            },
            map: MapConfig {
                center_lat: parse_var("MAP_CENTER_LAT", DEFAULT_MAP_CENTER_LAT)?,
                center_lng: parse_var("MAP_CENTER_LNG", DEFAULT_MAP_CENTER_LNG)?,
                max_radius_km: parse_var("MAP_MAX_RADIUS_KM", DEFAULT_MAP_MAX_RADIUS_KM)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            server: ServerConfig {
                host: default_host(),
                port: DEFAULT_PORT,
            },
            database: DatabaseSettings {
                path: DEFAULT_DB_PATH.to_string(),
            },
            lifecycle: LifecycleConfig {
                retention_hours: DEFAULT_RETENTION_HOURS,
                sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
                heartbeat_secs: DEFAULT_HEARTBEAT_SECS,
            },
            importer: ImporterConfig {
                interval_secs: DEFAULT_IMPORT_INTERVAL_SECS,
                startup_delay_secs: DEFAULT_IMPORT_STARTUP_DELAY_SECS,
                source_timeout_secs: DEFAULT_SOURCE_TIMEOUT_SECS,
                dedup_epsilon_deg: DEFAULT_DEDUP_EPSILON_DEG,
                geocoder_base_url: DEFAULT_GEOCODER_BASE_URL.to_string(),
            },
            storage: StorageConfig {
                upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
                max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            },
            map: MapConfig {
                center_lat: DEFAULT_MAP_CENTER_LAT,
                center_lng: DEFAULT_MAP_CENTER_LNG,
                max_radius_km: DEFAULT_MAP_MAX_RADIUS_KM,
            },
            cors: CorsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.lifecycle.retention_hours, 24);
        assert_eq!(config.lifecycle.retention(), chrono::Duration::hours(24));
        assert_eq!(config.importer.dedup_epsilon_deg, 0.001);
        assert_eq!(config.storage.max_upload_bytes(), 50 * 1024 * 1024);
    }

    #[test]
    fn test_server_address() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(server.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_environment_helpers() {
        assert!(Environment::Production.is_production());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_production());
    }
}
