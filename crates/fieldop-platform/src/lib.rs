//! ASIC platform identification and firmware branch detection.
//!
//! Resolution combines three inputs:
//! - **Device info:** the vendor tag and build version from the device's
//!   version file
//! - **Probes:** hardware SKU and PCI device listing, gathered by running
//!   platform commands with a bounded timeout
//! - **Vendor tables:** SKU and PCI description lists from the rules document
//!
//! Anything that cannot be matched resolves to [`PlatformId::unknown`].

pub mod device;
pub mod error;
pub mod platform;
pub mod probe;
pub mod resolver;
pub mod vendor;
pub mod version;

// Re-exports for convenience.
pub use device::{DeviceInfo, VersionFile, VersionInfo, DEFAULT_VERSION_FILE};
pub use error::{PlatformError, Result};
pub use platform::PlatformId;
pub use probe::{run_command, CommandProbe, PlatformProbe};
pub use resolver::{identify_asic, resolve_platform, AsicDetector};
pub use vendor::AsicVendor;
pub use version::{extract_branch_version, BranchVersion};
