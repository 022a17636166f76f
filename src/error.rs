use crate::taxonomy::ServiceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the crate's own plumbing. Lifecycle operations return
/// `Status` values instead; only the host boundary converts a failed
/// `Status` into the `Lifecycle` variant.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("lifecycle operation failed: {0}")]
    Lifecycle(String),
}
