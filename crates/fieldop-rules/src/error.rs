//! Rules error types.

use std::path::PathBuf;

/// Errors raised while locating, reading or querying a rules document.
///
/// All of these are configuration errors: they indicate a packaging or
/// deployment defect rather than a rejected change.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The rules file does not exist.
    #[error("field operation validators rules file not found: {}", path.display())]
    NotFound {
        /// The path that was searched.
        path: PathBuf,
    },

    /// The rules file is not valid JSON or does not have the expected shape.
    #[error("malformed rules document: {0}")]
    Json(#[from] serde_json::Error),

    /// A required section is absent from the document.
    #[error("rules document has no '{section}' section")]
    MissingSection { section: String },

    /// The configuration table has no entry in the document.
    #[error("rules document has no table '{table}'")]
    MissingTable { table: String },

    /// The table exists but carries no scenarios for the validator.
    #[error("table '{table}' has no validator data for '{validator}'")]
    MissingValidatorData { table: String, validator: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rules operations.
pub type Result<T> = std::result::Result<T, RulesError>;
