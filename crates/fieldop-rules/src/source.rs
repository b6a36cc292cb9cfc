//! Rules source trait and plain file/in-memory implementations.
//!
//! A `RulesSource` hands out an immutable, shared [`RulesDocument`]. Validators
//! call [`RulesSource::load`] once per validation, so a plain [`FileRules`]
//! always sees the current file contents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::document::RulesDocument;
use crate::error::{Result, RulesError};

/// File name of the rules document shipped alongside the validator.
pub const RULES_FILE_NAME: &str = "gcu_field_operation_validators.conf.json";

/// Abstract provider of the rules document.
pub trait RulesSource {
    /// Load the current rules document.
    fn load(&self) -> Result<Arc<RulesDocument>>;
}

impl<T: RulesSource + ?Sized> RulesSource for &T {
    fn load(&self) -> Result<Arc<RulesDocument>> {
        (**self).load()
    }
}

impl<T: RulesSource + ?Sized> RulesSource for Box<T> {
    fn load(&self) -> Result<Arc<RulesDocument>> {
        (**self).load()
    }
}

/// Default rules location: next to the running executable.
pub fn default_rules_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|dir| dir.join(RULES_FILE_NAME))
}

/// Reads and parses the rules file on every load.
#[derive(Debug, Clone)]
pub struct FileRules {
    path: PathBuf,
}

impl FileRules {
    /// Rules read from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRules { path: path.into() }
    }

    /// Path of the rules file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RulesSource for FileRules {
    fn load(&self) -> Result<Arc<RulesDocument>> {
        debug!(path = %self.path.display(), "loading rules document");
        read_document(&self.path).map(Arc::new)
    }
}

/// A rules document held in memory.
#[derive(Debug, Clone)]
pub struct StaticRules {
    document: Arc<RulesDocument>,
}

impl StaticRules {
    pub fn new(document: RulesDocument) -> Self {
        StaticRules {
            document: Arc::new(document),
        }
    }
}

impl RulesSource for StaticRules {
    fn load(&self) -> Result<Arc<RulesDocument>> {
        Ok(Arc::clone(&self.document))
    }
}

/// Read and parse a rules document from disk.
pub(crate) fn read_document(path: &Path) -> Result<RulesDocument> {
    if !path.exists() {
        return Err(RulesError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    RulesDocument::parse(&content)
}
