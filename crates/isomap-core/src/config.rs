use crate::app_config::{
    AppConfig, Environment, DEFAULT_ROUTING_API_VERSION, DEFAULT_ROUTING_BASE_URL,
    DEFAULT_USER_AGENT,
};
use crate::geo::LatLng;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as absent: `.env` templates often leave keys blank.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ISOMAP_ENV", "development"))?;
    let log_level = or_default("ISOMAP_LOG_LEVEL", "info");

    let routing_subscription_key = optional("AZURE_MAPS_SUBSCRIPTION_KEY");
    let maps_api_key = optional("GOOGLE_MAPS_API_KEY");

    let routing_base_url = or_default("ISOMAP_ROUTING_BASE_URL", DEFAULT_ROUTING_BASE_URL);
    if !routing_base_url.starts_with("http://") && !routing_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "ISOMAP_ROUTING_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{routing_base_url}'"),
        });
    }
    let routing_api_version = or_default("ISOMAP_ROUTING_API_VERSION", DEFAULT_ROUTING_API_VERSION);

    let request_timeout_secs = parse_u64("ISOMAP_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ISOMAP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("ISOMAP_USER_AGENT", DEFAULT_USER_AGENT);

    let default_time_budget_secs = parse_u32("ISOMAP_TIME_BUDGET_SECS", "900")?;
    if default_time_budget_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ISOMAP_TIME_BUDGET_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let default_origin = or_default("ISOMAP_ORIGIN", "37.7749,-122.4194")
        .parse::<LatLng>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "ISOMAP_ORIGIN".to_string(),
            reason: e.to_string(),
        })?;

    let style_path = optional("ISOMAP_STYLE_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        routing_subscription_key,
        maps_api_key,
        routing_base_url,
        routing_api_version,
        request_timeout_secs,
        user_agent,
        default_time_budget_secs,
        default_origin,
        style_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ISOMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
