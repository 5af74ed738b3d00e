use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Fetch failed: {0}")]
    FetchFailure(String),
    #[error("Malformed sale record `{id}`: {reason}")]
    MalformedRecord { id: String, reason: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
