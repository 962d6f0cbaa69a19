use crate::app_config::{AppConfig, Environment};
use crate::links::TravelMode;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("OUTPOST_ENV", "development"));

    let bind_addr = parse_addr("OUTPOST_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("OUTPOST_LOG_LEVEL", "info");
    let outlets_path = PathBuf::from(or_default("OUTPOST_OUTLETS_PATH", "./config/outlets.yaml"));

    let allowed_emails: Vec<String> = or_default("OUTPOST_ALLOWED_EMAILS", "")
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let expand_timeout_secs = parse_u64("OUTPOST_EXPAND_TIMEOUT_SECS", "10")?;

    let travel_mode = match lookup("OUTPOST_TRAVEL_MODE") {
        Ok(raw) => Some(
            raw.parse::<TravelMode>()
                .map_err(|reason| ConfigError::InvalidEnvVar {
                    var: "OUTPOST_TRAVEL_MODE".to_string(),
                    reason,
                })?,
        ),
        Err(_) => None,
    };

    let user_agent = or_default("OUTPOST_USER_AGENT", "outpost/0.1 (outlet-distance)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        outlets_path,
        allowed_emails,
        expand_timeout_secs,
        travel_mode,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
