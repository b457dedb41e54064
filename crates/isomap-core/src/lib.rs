pub mod app_config;
pub mod config;
pub mod geo;
pub mod style;

pub use app_config::{
    AppConfig, Environment, DEFAULT_ROUTING_API_VERSION, DEFAULT_ROUTING_BASE_URL,
    DEFAULT_USER_AGENT,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{Bounds, GeoError, LatLng, Position, Ring};
pub use style::{load_style, PolygonStyle, StyleOverrides};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read style file {path}: {source}")]
    StyleFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse style file: {0}")]
    StyleFileParse(#[from] serde_yaml::Error),

    #[error("style validation error: {0}")]
    Validation(String),
}
