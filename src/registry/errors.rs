//! Registry and resolution error types

use thiserror::Error;

use crate::name::ParseNameError;

/// Result type for schema-build operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building a registry from an ABI document.
///
/// All variants identify the offending name; `code()` returns a stable
/// machine-readable reason code.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Version string does not match a supported protocol revision
    #[error("unsupported ABI version '{0}'")]
    UnsupportedVersion(String),

    /// Name already taken within its namespace
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// Referenced type does not exist
    #[error("unknown type '{type_name}' referenced by {context}")]
    UnknownType { type_name: String, context: String },

    /// Alias chain does not terminate
    #[error("cyclic type alias involving '{0}'")]
    CyclicAlias(String),

    /// Struct base chain does not terminate
    #[error("cyclic inheritance involving struct '{0}'")]
    CyclicInheritance(String),

    /// Index type is not in the legal key-type set
    #[error("illegal key type '{type_name}' for index '{index}' of table '{table}'")]
    IllegalKeyType {
        table: String,
        index: String,
        type_name: String,
    },

    /// A record identifier is not a valid name
    #[error("invalid identifier: {0}")]
    InvalidName(#[from] ParseNameError),

    /// Document is not valid JSON
    #[error("malformed ABI document: {0}")]
    Json(#[from] serde_json::Error),

    /// Document could not be read
    #[error("failed to read ABI document: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Stable reason code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnsupportedVersion(_) => "ABI_UNSUPPORTED_VERSION",
            SchemaError::DuplicateName { .. } => "ABI_DUPLICATE_NAME",
            SchemaError::UnknownType { .. } => "ABI_UNKNOWN_TYPE",
            SchemaError::CyclicAlias(_) => "ABI_CYCLIC_ALIAS",
            SchemaError::CyclicInheritance(_) => "ABI_CYCLIC_INHERITANCE",
            SchemaError::IllegalKeyType { .. } => "ABI_ILLEGAL_KEY_TYPE",
            SchemaError::InvalidName(_) => "ABI_INVALID_NAME",
            SchemaError::Json(_) => "ABI_MALFORMED_DOCUMENT",
            SchemaError::Io(_) => "ABI_IO",
        }
    }
}

/// Errors raised while resolving a type name against a built registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Bare name not found among primitives, structs, variants or aliases
    #[error("unresolved type '{0}'")]
    Unresolved(String),

    /// Alias chain exceeded the registry-size bound
    #[error("alias chain for '{0}' exceeds the registry bound")]
    CyclicAlias(String),
}
