// --- File: crates/unenroll_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File, Map};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;
pub mod setup;

pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones winning: built-in defaults, `config/default.*`,
/// `config/{RUN_ENV}.*`, `UNENROLL__SECTION__KEY` variables, and finally the
/// plain `APOLLO_API_KEY` / `APOLLO_CAMPAIGN_ID` / `PORT` variables that the
/// setup wizard writes into `.env`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));
    let vars: Map<String, String> = env::vars().collect();

    load_config_from(&config_dir, &run_env, &vars)
}

/// Same layering as [`load_config`], with the config directory, run
/// environment and variable snapshot supplied by the caller.
pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    vars: &Map<String, String>,
) -> Result<AppConfig, ConfigError> {
    let prefix = vars
        .get("PREFIX")
        .cloned()
        .unwrap_or_else(|| env_vars::DEFAULT_PREFIX.to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading configuration from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", i64::from(DEFAULT_PORT))?
        .set_default("server.static_dir", DEFAULT_STATIC_DIR)?
        .set_default("apollo.base_url", DEFAULT_APOLLO_BASE_URL)?
        .set_default("apollo.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_with(raw_config, |name| vars.get(name).cloned())
}

/// Applies the plain environment variables on top of an already merged
/// configuration. `lookup` resolves a variable name to its value.
pub fn apply_env_overrides_with<F>(
    mut config: AppConfig,
    lookup: F,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let fallbacks = [
        ("apollo.api_key", &mut config.apollo.api_key),
        ("apollo.campaign_id", &mut config.apollo.campaign_id),
    ];
    for (path, slot) in fallbacks {
        if let Some(value) = env_vars::resolve_env_var_with(path, &lookup) {
            *slot = Some(value);
        }
    }

    let port = lookup("PORT")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());
    if let Some(port) = port {
        config.server.port = port.parse().map_err(|_| {
            ConfigError::Message(format!("PORT must be a valid port number, got '{port}'"))
        })?;
    }

    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` if set, else the first command line argument
/// when it starts with `.env`, else `.env`. Loading happens at most once per
/// process; a missing file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
