use crate::runtime_config::RuntimeConfig;
use crate::ConfigError;

/// Load runtime configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed or the fetch
/// timeout is zero.
pub fn load_runtime_config() -> Result<RuntimeConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_runtime_config_from_env()
}

/// Load runtime configuration from environment variables already in the process.
///
/// Unlike [`load_runtime_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Same as [`load_runtime_config`].
pub fn load_runtime_config_from_env() -> Result<RuntimeConfig, ConfigError> {
    build_runtime_config(|key| std::env::var(key))
}

/// Every variable is optional; parsing is decoupled from the process
/// environment so tests can pass a plain `HashMap` lookup.
fn build_runtime_config<F>(lookup: F) -> Result<RuntimeConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = RuntimeConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let log_level = or_default("ADDRFIELD_LOG_LEVEL", &defaults.log_level);
    let fetch_timeout_secs =
        parse_u64("ADDRFIELD_FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?;
    if fetch_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADDRFIELD_FETCH_TIMEOUT_SECS".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    let user_agent = or_default("ADDRFIELD_USER_AGENT", &defaults.user_agent);

    Ok(RuntimeConfig {
        log_level,
        fetch_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
