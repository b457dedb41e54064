use std::path::PathBuf;

use crate::geo::LatLng;

/// Production host of the reachable-range API.
pub const DEFAULT_ROUTING_BASE_URL: &str = "https://atlas.microsoft.com";
pub const DEFAULT_ROUTING_API_VERSION: &str = "1.0";
pub const DEFAULT_USER_AGENT: &str = "isomap/0.1 (isochrone-viewer)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Subscription key for the reachable-range API. Presence is checked
    /// only when a fetch is attempted.
    pub routing_subscription_key: Option<String>,
    /// Key for the map rendering SDK, passed through untouched.
    pub maps_api_key: Option<String>,
    pub routing_base_url: String,
    pub routing_api_version: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub default_time_budget_secs: u32,
    pub default_origin: LatLng,
    pub style_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "routing_subscription_key",
                &self.routing_subscription_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("routing_base_url", &self.routing_base_url)
            .field("routing_api_version", &self.routing_api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_time_budget_secs", &self.default_time_budget_secs)
            .field("default_origin", &self.default_origin)
            .field("style_path", &self.style_path)
            .finish()
    }
}
