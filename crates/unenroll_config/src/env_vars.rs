//! Environment variable handling for the Unenroll service.
//!
//! Configuration paths such as `server.port` map onto two naming patterns:
//! the structured `UNENROLL__SERVER__PORT` / `UNENROLL_SECRET_APOLLO_API_KEY`
//! names, and the plain legacy names (`APOLLO_API_KEY`) that the setup
//! wizard writes into `.env`.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "UNENROLL";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "UNENROLL_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.host"` becomes `"UNENROLL__SERVER__HOST"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"apollo.api_key"` becomes `"UNENROLL_SECRET_APOLLO_API_KEY"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a path to its legacy, unprefixed environment variable name
///
/// `"apollo.campaign_id"` becomes `"APOLLO_CAMPAIGN_ID"`.
pub fn legacy_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Check if a path is a secret path
///
/// Paths containing "secret", "key", "password" or "token" are secret.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("key")
        || path_lower.contains("password")
        || path_lower.contains("token")
}

/// Resolve a path against an arbitrary variable source.
///
/// The structured name (secret or config pattern) is tried first, then the
/// legacy name. Blank values are skipped.
pub fn resolve_env_var_with<F>(path: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let structured = if is_secret_path(path) {
        secret_path_to_env_var(path)
    } else {
        config_path_to_env_var(path)
    };

    [structured, legacy_path_to_env_var(path)]
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
