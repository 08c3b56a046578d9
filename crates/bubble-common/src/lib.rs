//! # bubble-common
//!
//! Shared utilities: application configuration, the application error
//! type, and tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseSettings, Environment,
    ImporterConfig, LifecycleConfig, MapConfig, ServerConfig, StorageConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
