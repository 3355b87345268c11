use thiserror::Error;

use super::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("failed to encode result")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Command(String),
}
