//! Device introspection.
//!
//! The vendor tag and firmware build version come from the device's version
//! file, a YAML document written at image build time. It is re-read on every
//! query.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};

/// Default location of the device version file.
pub const DEFAULT_VERSION_FILE: &str = "/etc/sonic/sonic_version.yml";

/// The subset of the version file the validators need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Vendor tag, e.g. `broadcom`, `mellanox`, `cisco-8000`.
    pub asic_type: String,
    /// Firmware build version, e.g. `SONiC.20201231.39`.
    pub build_version: String,
}

/// Read-only access to the running device's identity.
pub trait DeviceInfo {
    /// Current vendor tag and build version.
    fn version_info(&self) -> Result<VersionInfo>;
}

impl<T: DeviceInfo + ?Sized> DeviceInfo for &T {
    fn version_info(&self) -> Result<VersionInfo> {
        (**self).version_info()
    }
}

/// Device info backed by the YAML version file.
#[derive(Debug, Clone)]
pub struct VersionFile {
    path: PathBuf,
}

impl VersionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VersionFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for VersionFile {
    fn default() -> Self {
        VersionFile::new(DEFAULT_VERSION_FILE)
    }
}

impl DeviceInfo for VersionFile {
    fn version_info(&self) -> Result<VersionInfo> {
        if !self.path.exists() {
            return Err(PlatformError::VersionFileNotFound {
                path: self.path.clone(),
            });
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}
