//! Error types for intent-oracle-core.
//!
//! This module defines the central error type [`OracleError`] used throughout
//! the crate, along with the [`OracleResult<T>`] type alias.
//!
//! Entropy failures have their own type ([`crate::entropy::EntropyError`]):
//! they are always absorbed by the guarded source and never reach a caller.
//!
//! # Examples
//!
//! ```rust
//! use intent_oracle_core::OracleError;
//!
//! let error = OracleError::DimensionMismatch {
//!     expected: 300,
//!     actual: 4,
//! };
//!
//! match &error {
//!     OracleError::DimensionMismatch { expected, actual } => {
//!         assert_eq!(*expected, 300);
//!         assert_eq!(*actual, 4);
//!     }
//!     _ => panic!("unexpected variant"),
//! }
//!
//! assert!(error.to_string().contains("300"));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for oracle operations.
///
/// Only structural precondition violations end up here. Degenerate vectors
/// during a walk are not errors; they end the walk with a
/// [`crate::crystallize::StopReason`].
#[derive(Debug, Error)]
pub enum OracleError {
    /// The embedding table has no entries.
    #[error("Embedding table is empty")]
    EmptyTable,

    /// `words` and `vectors` have different lengths.
    ///
    /// # When This Occurs
    ///
    /// - Artifact written with a truncated vector block
    /// - Hand-built tables in tests
    #[error("Embedding table length mismatch: {words} words, {vectors} vectors")]
    LengthMismatch {
        /// Number of words
        words: usize,
        /// Number of vectors
        vectors: usize,
    },

    /// A vector in the table does not share the table dimension.
    #[error("Ragged embedding table: row {row} ('{word}') has dimension {actual}, expected {expected}")]
    RaggedTable {
        /// Row index of the offending vector
        row: usize,
        /// Word stored at that row
        word: String,
        /// Dimension of the first row
        expected: usize,
        /// Dimension of the offending row
        actual: usize,
    },

    /// A vector dimension of zero was requested or loaded.
    #[error("Invalid vector dimension: {0} (must be > 0)")]
    InvalidDimension(usize),

    /// Charge vector and embedding table disagree on dimension.
    #[error("Charge dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the embedding table
        expected: usize,
        /// Dimension of the charge vector
        actual: usize,
    },

    /// Intent text was empty or whitespace only.
    #[error("Intent text cannot be empty")]
    EmptyIntent,

    /// The embedding artifact could not be read or parsed.
    #[error("Artifact error at {path}: {message}")]
    Artifact {
        /// Path of the artifact
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// IO error outside artifact loading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OracleError {
    /// Build an [`OracleError::Artifact`] for `path`.
    pub fn artifact(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        OracleError::Artifact {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by configuration or the artifact rather than
    /// by a single request.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            OracleError::EmptyTable
                | OracleError::LengthMismatch { .. }
                | OracleError::RaggedTable { .. }
                | OracleError::InvalidDimension(_)
                | OracleError::Artifact { .. }
                | OracleError::ConfigError(_)
        )
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        OracleError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for OracleError {
    fn from(err: config::ConfigError) -> Self {
        OracleError::ConfigError(err.to_string())
    }
}

/// Result type alias for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = OracleError::DimensionMismatch {
            expected: 300,
            actual: 50,
        };
        assert!(err.to_string().contains("300"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_ragged_table_names_row_and_word() {
        let err = OracleError::RaggedTable {
            row: 7,
            word: "tide".to_string(),
            expected: 4,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("row 7"));
        assert!(msg.contains("'tide'"));
    }

    #[test]
    fn test_setup_error_classification() {
        assert!(OracleError::EmptyTable.is_setup_error());
        assert!(OracleError::artifact("data/x.json", "missing").is_setup_error());
        assert!(!OracleError::EmptyIntent.is_setup_error());
        assert!(!OracleError::DimensionMismatch {
            expected: 1,
            actual: 2
        }
        .is_setup_error());
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: OracleError = parse_err.into();
        assert!(matches!(err, OracleError::SerializationError(_)));
    }
}
