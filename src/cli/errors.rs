//! CLI error types

use thiserror::Error;

use crate::serializer::SerializerError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Serializer(#[from] SerializerError),

    /// Value argument is not valid JSON
    #[error("invalid JSON value: {0}")]
    InvalidValue(serde_json::Error),

    /// Hex argument is malformed
    #[error("invalid hex input: {0}")]
    InvalidHex(hex::FromHexError),
}

pub type CliResult<T> = Result<T, CliError>;
