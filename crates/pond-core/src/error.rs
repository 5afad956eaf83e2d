//! Error types for Pond Logger

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PondError>;

#[derive(Error, Debug)]
pub enum PondError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingField(Vec<String>),

    #[error("Field(s) must be numeric: {}", .0.join(", "))]
    TypeMismatch(Vec<String>),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PondError {
    /// True for errors the client can fix by correcting its request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PondError::Storage(_))
    }
}
