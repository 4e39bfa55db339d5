// --- File: crates/unenroll_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_APOLLO_BASE_URL: &str = "https://api.apollo.io/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}

fn default_base_url() -> String {
    DEFAULT_APOLLO_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the web form; served for every non-API path.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: default_static_dir(),
        }
    }
}

// --- Apollo Config ---
// api_key and campaign_id are the process-wide fallbacks used when a request
// leaves them out. Usually loaded from APOLLO_API_KEY / APOLLO_CAMPAIGN_ID.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApolloConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApolloConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            campaign_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApolloConfig {
    /// Fallback API key, ignoring blank values.
    pub fn fallback_api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// Fallback campaign id, ignoring blank values.
    pub fn fallback_campaign_id(&self) -> Option<&str> {
        non_blank(self.campaign_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub apollo: ApolloConfig,
}
