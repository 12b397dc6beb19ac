use crate::app_config::{AppConfig, Environment};
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("STORAGESCAN_ENV", "development"))?;
    let log_level = or_default("STORAGESCAN_LOG_LEVEL", "info");
    let sites_path = PathBuf::from(or_default("STORAGESCAN_SITES_PATH", "./config/sites.yaml"));

    let scraper_request_timeout_secs = parse_u64("STORAGESCAN_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STORAGESCAN_SCRAPER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let scraper_user_agent = or_default(
        "STORAGESCAN_SCRAPER_USER_AGENT",
        "storagescan/0.1 (facility-rates)",
    );
    let scraper_discovery_delay_ms = parse_u64("STORAGESCAN_SCRAPER_DISCOVERY_DELAY_MS", "10000")?;

    Ok(AppConfig {
        env,
        log_level,
        sites_path,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_discovery_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STORAGESCAN_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
