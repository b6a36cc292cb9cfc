//! Rules document cache keyed on file modification time.
//!
//! Amortizes repeated reads when many patch elements are validated in one
//! process. The cached document is reused only while the file's mtime is
//! unchanged; [`CachedFileRules::invalidate`] drops it unconditionally.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::document::RulesDocument;
use crate::error::{Result, RulesError};
use crate::source::{read_document, RulesSource};

/// A file-backed rules source that keeps the last parsed document.
#[derive(Debug)]
pub struct CachedFileRules {
    path: PathBuf,
    cached: Mutex<Option<CachedDocument>>,
}

#[derive(Debug)]
struct CachedDocument {
    modified: SystemTime,
    document: Arc<RulesDocument>,
}

impl CachedFileRules {
    /// Cache rules read from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CachedFileRules {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// Path of the rules file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop the cached document; the next load re-reads the file.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Whether a document is currently cached.
    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CachedDocument>> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RulesSource for CachedFileRules {
    fn load(&self) -> Result<Arc<RulesDocument>> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.invalidate();
                return Err(RulesError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        // Filesystems without mtime support never hit the cache.
        let modified = metadata.modified().ok();

        let mut cached = self.lock();
        if let (Some(entry), Some(modified)) = (cached.as_ref(), modified) {
            if entry.modified == modified {
                debug!(path = %self.path.display(), "rules document served from cache");
                return Ok(Arc::clone(&entry.document));
            }
        }

        let document = Arc::new(read_document(&self.path)?);
        info!(path = %self.path.display(), "rules document loaded");
        *cached = modified.map(|modified| CachedDocument {
            modified,
            document: Arc::clone(&document),
        });
        Ok(document)
    }
}
