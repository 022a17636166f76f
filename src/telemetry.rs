use crate::config::Config;
use crate::error::Result;
use tracing_subscriber::{filter::EnvFilter, fmt};

/// Initialize global logging based on env or config.
/// Order: GROUNDWORK_LOG env -> cfg.log_level -> "info"
pub fn init_telemetry(cfg: &Config) -> Result<()> {
    let level_from_env = std::env::var("GROUNDWORK_LOG").ok();
    let filter = match level_from_env {
        Some(s) => EnvFilter::try_new(s),
        None => EnvFilter::try_new(cfg.log_level.clone()),
    }
    .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    tracing::info!("telemetry initialized");
    Ok(())
}
