use crate::server;
use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("server error: {err}")]
    ServerError { err: server::error::ServerError },
    #[error("configuration error: {err}")]
    ConfigError { err: config::ConfigError },
    #[error("io error: {err}")]
    IoError { err: String },
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::IoError {
            err: value.to_string(),
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(value: config::ConfigError) -> Self {
        Self::ConfigError { err: value }
    }
}

impl From<server::error::ServerError> for CliError {
    fn from(value: server::error::ServerError) -> Self {
        Self::ServerError { err: value }
    }
}
