//! Error types for the covered-call engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CCError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type CCResult<T> = Result<T, CCError>;

impl CCError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn insufficient_history(msg: impl Into<String>) -> Self {
        Self::InsufficientHistory(msg.into())
    }

    pub fn numerical(msg: impl Into<String>) -> Self {
        Self::Numerical(msg.into())
    }

    /// True for "no result for this input" outcomes that a batch caller skips
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CCError::DataUnavailable(_) | CCError::InsufficientHistory(_)
        )
    }
}

impl From<serde_json::Error> for CCError {
    fn from(e: serde_json::Error) -> Self {
        CCError::Serialization(e.to_string())
    }
}
