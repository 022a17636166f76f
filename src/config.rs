use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional append-mode text log file for the sink.
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_service_name() -> String { "groundwork".to_string() }
fn default_log_level() -> String { "info".to_string() }

/// Load configuration from `GROUNDWORK_CONFIG` (TOML) if set, otherwise
/// `config.toml`. If the file doesn't exist, return safe defaults.
pub fn load_config() -> Result<Config> {
    let config_path = std::env::var("GROUNDWORK_CONFIG").unwrap_or_else(|_| "config.toml".into());
    load_config_from(config_path)
}

/// Load configuration from an explicit path, with the same missing-file
/// fallback as `load_config`.
pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        let content = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        Ok(Config {
            service_name: default_service_name(),
            log_level: default_log_level(),
            log_file: None,
        })
    }
}
