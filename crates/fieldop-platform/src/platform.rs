//! Canonical platform identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical name of the switching silicon running on the device.
///
/// One of `cisco-8000`, `spc1`, a Broadcom shorthand declared in the rules
/// document (e.g. `th2`, `td3`), or `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    /// Token for a platform that could not be identified.
    pub const UNKNOWN: &'static str = "unknown";
    /// Token for Cisco 8000 silicon.
    pub const CISCO_8000: &'static str = "cisco-8000";
    /// Token for Mellanox Spectrum-1 silicon.
    pub const SPC1: &'static str = "spc1";

    pub fn new(name: impl Into<String>) -> Self {
        PlatformId(name.into())
    }

    pub fn unknown() -> Self {
        PlatformId::new(Self::UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_platform() {
        assert!(PlatformId::unknown().is_unknown());
        assert!(!PlatformId::new(PlatformId::SPC1).is_unknown());
        assert_eq!(PlatformId::unknown().to_string(), "unknown");
    }

    #[test]
    fn transparent_serde() {
        let id: PlatformId = serde_yaml::from_str("th2").unwrap();
        assert_eq!(id, PlatformId::new("th2"));
        assert_eq!(serde_yaml::to_string(&id).unwrap(), "th2\n");
    }
}
