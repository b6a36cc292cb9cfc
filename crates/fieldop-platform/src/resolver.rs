//! Platform resolution.
//!
//! Each vendor family has its own detector:
//! - Cisco 8000: fixed platform, no probe
//! - Mellanox: hardware SKU compared case-insensitively with the `spc1` list
//! - Broadcom: PCI listing searched for each shorthand's descriptions
//!
//! A Mellanox SKU outside the `spc1` list resolves to `unknown`, not to a
//! generic Mellanox platform.

use fieldop_rules::{AsicMapping, RulesDocument, RulesSource};
use tracing::debug;

use crate::device::DeviceInfo;
use crate::error::Result;
use crate::platform::PlatformId;
use crate::probe::PlatformProbe;
use crate::vendor::AsicVendor;

/// Vendor-specific detection strategy.
pub trait AsicDetector {
    fn detect(&self, mapping: &AsicMapping, probe: &dyn PlatformProbe) -> PlatformId;
}

/// A vendor with a single platform.
struct FixedAsic(&'static str);

impl AsicDetector for FixedAsic {
    fn detect(&self, _mapping: &AsicMapping, _probe: &dyn PlatformProbe) -> PlatformId {
        PlatformId::new(self.0)
    }
}

struct MellanoxSku;

impl AsicDetector for MellanoxSku {
    fn detect(&self, mapping: &AsicMapping, probe: &dyn PlatformProbe) -> PlatformId {
        let Some(hwsku) = probe.hwsku() else {
            return PlatformId::unknown();
        };
        let hwsku = hwsku.to_lowercase();
        let is_spc1 = mapping
            .mellanox_asics
            .spc1
            .iter()
            .any(|sku| sku.to_lowercase() == hwsku);
        debug!(%hwsku, is_spc1, "matched mellanox hwsku");
        if is_spc1 {
            PlatformId::new(PlatformId::SPC1)
        } else {
            PlatformId::unknown()
        }
    }
}

struct BroadcomPci;

impl AsicDetector for BroadcomPci {
    fn detect(&self, mapping: &AsicMapping, probe: &dyn PlatformProbe) -> PlatformId {
        let Some(listing) = probe.pci_devices() else {
            return PlatformId::unknown();
        };
        // Declaration order decides between shorthands whose descriptions overlap.
        mapping
            .broadcom_asics
            .iter()
            .filter(|(shorthand, _)| shorthand.as_str() != PlatformId::UNKNOWN)
            .find(|(_, descriptions)| {
                descriptions
                    .iter()
                    .any(|description| listing.contains(description.as_str()))
            })
            .map(|(shorthand, _)| PlatformId::new(shorthand.as_str()))
            .unwrap_or_else(PlatformId::unknown)
    }
}

static CISCO_8000: FixedAsic = FixedAsic(PlatformId::CISCO_8000);
static MELLANOX: MellanoxSku = MellanoxSku;
static BROADCOM: BroadcomPci = BroadcomPci;

impl AsicVendor {
    /// The detector for this vendor, or `None` for unsupported vendors.
    pub fn detector(&self) -> Option<&'static dyn AsicDetector> {
        match self {
            AsicVendor::Cisco8000 => Some(&CISCO_8000),
            AsicVendor::Mellanox => Some(&MELLANOX),
            AsicVendor::Broadcom => Some(&BROADCOM),
            AsicVendor::Other(_) => None,
        }
    }
}

/// Identify the platform for a vendor using an already loaded rules document.
pub fn identify_asic(
    doc: &RulesDocument,
    vendor: &AsicVendor,
    probe: &dyn PlatformProbe,
) -> Result<PlatformId> {
    let mapping = doc.asic_mapping()?;
    let platform = match vendor.detector() {
        Some(detector) => detector.detect(mapping, probe),
        None => PlatformId::unknown(),
    };
    debug!(%vendor, %platform, "resolved platform");
    Ok(platform)
}

/// Resolve the running platform from scratch: load the rules, read the vendor
/// tag, and run the vendor's detector.
///
/// Fails only when the rules document or device info cannot be read.
pub fn resolve_platform(
    rules: &dyn RulesSource,
    device: &dyn DeviceInfo,
    probe: &dyn PlatformProbe,
) -> Result<PlatformId> {
    let doc = rules.load()?;
    let info = device.version_info()?;
    identify_asic(&doc, &AsicVendor::from_tag(&info.asic_type), probe)
}
