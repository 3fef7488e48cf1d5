//! Configuration for the PredictCare service
//!
//! Layered settings plus the centralized constants they default to.

pub mod constants;
pub mod settings;

pub use settings::{
    ConfigError, CorsConfig, LogFormat, ObservabilityConfig, ServerConfig, ServiceConfig, Settings,
    SettingsLoader,
};
