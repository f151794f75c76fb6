//! Codec error types
//!
//! Every failure identifies the offending field path, dotted and indexed
//! the way the value tree is walked (e.g. `outer.items[3].member`).

use thiserror::Error;

/// Result type for encode/decode operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while encoding or decoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before the value did
    #[error("truncated input at '{path}': needed {needed} more bytes, {remaining} available")]
    TruncatedInput {
        path: String,
        needed: usize,
        remaining: usize,
    },

    /// Malformed variable-length count or length
    #[error("invalid length prefix at '{path}'")]
    InvalidLengthPrefix { path: String },

    /// Variant tag outside the member list (decode) or an unknown member
    /// type name (encode)
    #[error("invalid variant tag '{tag}' at '{path}': variant has {members} members")]
    InvalidVariantTag {
        path: String,
        tag: String,
        members: usize,
    },

    /// Value does not fit the shape at this position
    #[error("mismatch at '{path}': expected {expected}, got {actual}")]
    FieldMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Wall-clock budget exhausted
    #[error("deadline exceeded at '{path}'")]
    DeadlineExceeded { path: String },

    /// Nesting beyond the recursion bound
    #[error("recursion depth limit ({limit}) exceeded at '{path}'")]
    RecursionDepthExceeded { path: String, limit: usize },

    /// Bytes left over after the value decoded completely
    #[error("{remaining} trailing bytes after value decoded completely")]
    TrailingBytes { remaining: usize },
}

impl CodecError {
    pub(crate) fn mismatch(
        path: &str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CodecError::FieldMismatch {
            path: path.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_path() {
        let err = CodecError::mismatch("outer.items[3]", "uint32", "string");
        let text = err.to_string();
        assert!(text.contains("outer.items[3]"));
        assert!(text.contains("uint32"));
    }
}
