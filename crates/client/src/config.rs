use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/spesa.toml";

/// Client configuration.
///
/// Loaded from an optional TOML file plus `SPESA_*` environment
/// overrides; every field has a usable default, so a missing file is
/// not an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Collection base path of the remote store.
    pub base_url: String,
    /// Fixed request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
    /// Where the persisted session record lives.
    pub session_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://67ac71475853dfff53dab929.mockapi.io/api/v1".to_string(),
            timeout_secs: 10,
            session_path: "config/session.json".to_string(),
        }
    }
}

pub fn load() -> Result<AppConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

pub fn load_from(path: &str) -> Result<AppConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPESA"));
    Ok(builder.build()?.try_deserialize()?)
}
