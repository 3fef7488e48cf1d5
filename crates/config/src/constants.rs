//! Centralized constants for the PredictCare service
//!
//! Single source of truth for server defaults and service messages. Settings
//! fall back to these when neither the config file nor the environment set a
//! value. Scoring constants live in `predictcare_core::constants`.

/// Listener defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 5328;
}

/// Timeouts (seconds)
pub mod timeouts {
    /// Whole-request timeout applied by the HTTP layer
    pub const REQUEST_SECS: u64 = 10;
}

/// Request limits
pub mod limits {
    /// Attribute records are small flat objects
    pub const MAX_BODY_BYTES: usize = 64 * 1024;
}

/// Service identity and fixed response text
pub mod service {
    pub const NAME: &str = "predictcare";
    pub const GREETING: &str = "Welcome to the PredictCare API";
    pub const HEALTH_STATUS: &str = "healthy";
    pub const HEALTH_MESSAGE: &str = "PredictCare API is running";
}

/// Observability defaults
pub mod observability {
    pub const LOG_LEVEL: &str = "info";
    pub const METRICS_PATH: &str = "/metrics";
}

/// Environment and file lookup
pub mod env {
    /// `PREDICTCARE__SERVER__PORT=8080`
    pub const PREFIX: &str = "PREDICTCARE";
    pub const SEPARATOR: &str = "__";

    /// Explicit config file path
    pub const CONFIG_PATH_VAR: &str = "PREDICTCARE_CONFIG";

    /// Looked up (optionally) when no explicit path is given; extension inferred
    pub const DEFAULT_CONFIG_FILE: &str = "config/default";
}
