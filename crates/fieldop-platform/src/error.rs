//! Error types for platform resolution.

use std::path::PathBuf;

use fieldop_rules::RulesError;

/// Errors that can occur while identifying the running platform.
///
/// Probe command failures are deliberately absent: they resolve to an
/// unknown platform instead.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The rules document could not be loaded or lacks vendor tables.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// The device version file does not exist.
    #[error("device version file not found: {}", path.display())]
    VersionFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The device version file is not valid YAML or lacks required keys.
    #[error("malformed device version file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error reading device files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
