//! Validation error types.

use fieldop_platform::PlatformError;
use fieldop_rules::RulesError;

/// Errors that stop validation outright.
///
/// A rejected change is not an error; see [`crate::Decision`].
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Rules document missing, malformed, or lacking the target table.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Device info could not be read.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The element's path is not a usable JSON pointer.
    #[error("invalid patch path '{path}': {detail}")]
    InvalidPath { path: String, detail: String },

    /// The patch document could not be parsed.
    #[error("malformed patch: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, ValidateError>;
