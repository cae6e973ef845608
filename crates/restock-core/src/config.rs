use crate::app_config::SyncConfig;
use crate::ConfigError;

pub const DEFAULT_API_VERSION: &str = "2025-07";
pub const DEFAULT_USER_AGENT: &str = "restock-sync/0.1 (restock-date-sync)";

/// Load sync configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an optional tuning value cannot be parsed.
pub fn load_sync_config() -> Result<SyncConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_sync_config_from_env()
}

/// Load sync configuration from environment variables already in the process.
///
/// Unlike [`load_sync_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if an optional tuning value cannot be parsed.
pub fn load_sync_config_from_env() -> Result<SyncConfig, ConfigError> {
    build_sync_config(|key| std::env::var(key))
}

/// Build sync configuration using the provided env-var lookup function.
///
/// Store, token, and feed URL are not required here: a missing value becomes
/// an empty string and surfaces later as a failed request.
fn build_sync_config<F>(lookup: F) -> Result<SyncConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let shopify_store = or_default("SHOPIFY_STORE", "");
    let shopify_admin_token = or_default("SHOPIFY_ADMIN_TOKEN", "");
    let sheet_csv_url = or_default("SHEET_CSV_URL", "");

    let shopify_api_version = or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);
    let log_level = or_default("RESTOCK_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("RESTOCK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("RESTOCK_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(SyncConfig {
        shopify_store,
        shopify_admin_token,
        shopify_api_version,
        sheet_csv_url,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
