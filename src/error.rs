//! Error types for flatdb
//!
//! All fallible operations return `FlatDbResult<T>`. Note that reading a
//! flat file never fails with an error: it reports a `ReadStatus` instead,
//! so the recreate/abort policy can act on the exact failure kind.

use crate::db::{CodecError, ReadStatus};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for flatdb operations
pub type FlatDbResult<T> = Result<T, FlatDbError>;

/// All errors that can occur in flatdb
#[derive(Error, Debug)]
pub enum FlatDbError {
    // Write path
    #[error("Failed to open file {path} for writing: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialize or I/O error - {0}")]
    Serialize(#[from] CodecError),

    #[error("Payload lock poisoned while saving {0}")]
    PayloadPoisoned(String),

    // Policy outcomes surfaced to the caller
    #[error("File format of {path} is unknown or invalid, please fix it manually")]
    Unrecoverable { path: PathBuf },

    #[error("Verification of {path} failed: {status}")]
    VerifyFailed { path: PathBuf, status: ReadStatus },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("TTL of {0} seconds is out of range")]
    InvalidTtl(i64),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Invalid network tag {value:?}: {reason}")]
    NetworkTagInvalid { value: String, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl FlatDbError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Unrecoverable { .. } => {
                Some("Inspect it with: flatdb inspect <file>, then move it aside to recreate")
            }
            Self::VerifyFailed { .. } => Some("Run: flatdb inspect <file> for details"),
            Self::NetworkTagInvalid { .. } => Some("Network tags are hex strings, e.g. bf0c6bbd"),
            Self::InvalidTtl(_) => Some("Use a smaller TTL, e.g. --ttl 86400"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FlatDbError::Unrecoverable {
            path: PathBuf::from("/data/flatcache.dat"),
        };
        assert!(err.to_string().contains("please fix it manually"));
        assert!(err.to_string().contains("flatcache.dat"));
    }

    #[test]
    fn error_hint() {
        let err = FlatDbError::NetworkTagInvalid {
            value: "zz".into(),
            reason: "bad hex".into(),
        };
        assert_eq!(err.hint(), Some("Network tags are hex strings, e.g. bf0c6bbd"));
        assert!(FlatDbError::KeyNotFound("k".into()).hint().is_none());
    }

    #[test]
    fn invalid_ttl_has_hint() {
        let err = FlatDbError::InvalidTtl(i64::MAX);
        assert!(err.to_string().contains("out of range"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn codec_error_converts() {
        let err: FlatDbError = CodecError::InvalidUtf8.into();
        assert!(matches!(err, FlatDbError::Serialize(_)));
    }
}
