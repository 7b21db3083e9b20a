use thiserror::Error;

use crate::config::ConfigError;
use crate::model::NetworkError;

#[derive(Debug, Error)]
pub enum CollabnetError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CollabnetError>;
