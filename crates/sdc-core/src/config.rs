use reqwest::Url;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_API_BASE_URL: &str = "https://sdcapi.datadrivendetroit.org";
const DEFAULT_GEOCODE_BASE_URL: &str = "https://api.tiles.mapbox.com/v4/geocode/mapbox.places";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_url = |var: &str, default: &str| -> Result<Url, ConfigError> {
        let raw = or_default(var, default);
        Url::parse(&raw).map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let geocode_token = require("SDC_GEOCODE_TOKEN")?;
    if geocode_token.trim().is_empty() {
        return Err(invalid("SDC_GEOCODE_TOKEN", "must not be empty".to_string()));
    }

    let env = parse_environment(&or_default("SDC_ENV", "development"))?;
    let log_level = or_default("SDC_LOG_LEVEL", "info");

    let api_base_url = parse_url("SDC_API_BASE_URL", DEFAULT_API_BASE_URL)?;
    let geocode_base_url = parse_url("SDC_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL)?;
    let site_base_url = parse_url("SDC_SITE_BASE_URL", "http://localhost:8000")?;
    let geocode_country = or_default("SDC_GEOCODE_COUNTRY", "us,pr");

    let min_query_len = parse_usize("SDC_MIN_QUERY_LEN", "3")?;
    if min_query_len == 0 {
        return Err(invalid("SDC_MIN_QUERY_LEN", "must be at least 1".to_string()));
    }
    let fulltext_result_cap = parse_usize("SDC_FULLTEXT_RESULT_CAP", "20")?;
    let partial_results = parse_bool("SDC_PARTIAL_RESULTS", "false")?;

    let http_timeout_secs = parse_u64("SDC_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SDC_USER_AGENT", "sdc-suggest/0.1 (search-suggestions)");

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        geocode_base_url,
        geocode_token,
        geocode_country,
        min_query_len,
        fulltext_result_cap,
        partial_results,
        http_timeout_secs,
        user_agent,
        site_base_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SDC_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
