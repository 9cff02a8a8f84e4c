use strum_macros::AsRefStr;
use thiserror::Error;

pub type ServerResult<T> = core::result::Result<T, ServerError>;

#[derive(Clone, Debug, AsRefStr, Error)]
pub enum ServerError {
    /// A required parameter is missing or empty, or a name collides.
    #[error("{why}")]
    ValidationError { why: String },
    #[error("{why}")]
    NotFound { why: String },
    #[error("{why}")]
    AxumError { why: String },
    #[error("{why}")]
    IOError { why: String },
}

impl ServerError {
    pub fn file_not_found() -> Self {
        Self::NotFound { why: "File not found".into() }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError { why: value.to_string() }
    }
}
