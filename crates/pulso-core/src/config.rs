use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Accepted range for `PULSO_SEARCH_MAX_RESULTS` (the recent-search endpoint's own limits).
const MAX_RESULTS_RANGE: std::ops::RangeInclusive<u32> = 10..=100;

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
/// Does not read `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parse and validate configuration through `lookup`, so tests can feed a
/// plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let x_bearer_token = require("PULSO_X_BEARER_TOKEN")?;

    let env = parse_environment(&or_default("PULSO_ENV", "development"));

    let bind_addr = or_default("PULSO_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PULSO_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PULSO_LOG_LEVEL", "info");
    let x_base_url = or_default("PULSO_X_BASE_URL", "https://api.twitter.com");

    let search_max_results = parse_u32("PULSO_SEARCH_MAX_RESULTS", "10")?;
    if !MAX_RESULTS_RANGE.contains(&search_max_results) {
        return Err(invalid(
            "PULSO_SEARCH_MAX_RESULTS",
            format!(
                "{search_max_results} is outside {}..={}",
                MAX_RESULTS_RANGE.start(),
                MAX_RESULTS_RANGE.end()
            ),
        ));
    }
    let search_timeout_secs = parse_u64("PULSO_SEARCH_TIMEOUT_SECS", "30")?;
    let search_max_attempts = parse_u32("PULSO_SEARCH_MAX_ATTEMPTS", "3")?;
    let search_backoff_base_secs = parse_u64("PULSO_SEARCH_BACKOFF_BASE_SECS", "60")?;

    let sentiment_url = or_default("PULSO_SENTIMENT_URL", "http://localhost:8080");
    let sentiment_timeout_secs = parse_u64("PULSO_SENTIMENT_TIMEOUT_SECS", "60")?;

    let default_location = or_default("PULSO_DEFAULT_LOCATION", "Bogotá");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        x_bearer_token,
        x_base_url,
        search_max_results,
        search_timeout_secs,
        search_max_attempts,
        search_backoff_base_secs,
        sentiment_url,
        sentiment_timeout_secs,
        default_location,
    })
}

/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("PULSO_X_BEARER_TOKEN", "test-token");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_bearer_token() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PULSO_X_BEARER_TOKEN"),
            "expected MissingEnvVar(PULSO_X_BEARER_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_treats_blank_token_as_missing() {
        let mut map = HashMap::new();
        map.insert("PULSO_X_BEARER_TOKEN", "   ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.x_bearer_token, "test-token");
        assert_eq!(cfg.x_base_url, "https://api.twitter.com");
        assert_eq!(cfg.search_max_results, 10);
        assert_eq!(cfg.search_timeout_secs, 30);
        assert_eq!(cfg.search_max_attempts, 3);
        assert_eq!(cfg.search_backoff_base_secs, 60);
        assert_eq!(cfg.sentiment_url, "http://localhost:8080");
        assert_eq!(cfg.sentiment_timeout_secs, 60);
        assert_eq!(cfg.default_location, "Bogotá");
    }

    #[test]
    fn build_app_config_applies_overrides() {
        let mut map = full_env();
        map.insert("PULSO_ENV", "production");
        map.insert("PULSO_SEARCH_MAX_RESULTS", "50");
        map.insert("PULSO_SEARCH_BACKOFF_BASE_SECS", "5");
        map.insert("PULSO_DEFAULT_LOCATION", "Cali");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.search_max_results, 50);
        assert_eq!(cfg.search_backoff_base_secs, 5);
        assert_eq!(cfg.default_location, "Cali");
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("PULSO_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PULSO_BIND_ADDR"),
            "expected InvalidEnvVar(PULSO_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_max_results_out_of_range() {
        for raw in ["5", "101"] {
            let mut map = full_env();
            map.insert("PULSO_SEARCH_MAX_RESULTS", raw);
            let result = build_app_config(lookup_from_map(&map));
            assert!(
                matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PULSO_SEARCH_MAX_RESULTS"),
                "expected InvalidEnvVar for {raw}, got: {result:?}"
            );
        }
    }

    #[test]
    fn build_app_config_rejects_non_numeric_attempts() {
        let mut map = full_env();
        map.insert("PULSO_SEARCH_MAX_ATTEMPTS", "many");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PULSO_SEARCH_MAX_ATTEMPTS"),
            "expected InvalidEnvVar(PULSO_SEARCH_MAX_ATTEMPTS), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_bearer_token() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("[redacted]"));
    }
}
