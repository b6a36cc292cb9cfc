//! ASIC vendor classification.

use std::fmt;

/// Vendor family reported in the device's `asic_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsicVendor {
    /// Cisco 8000 series silicon; a single platform.
    Cisco8000,
    /// Mellanox/NVIDIA Spectrum; generation decided by hardware SKU.
    Mellanox,
    /// Broadcom StrataXGS; family decided by PCI device listing.
    Broadcom,
    /// Any other tag, including virtual switches.
    Other(String),
}

impl AsicVendor {
    /// Classify an `asic_type` tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "cisco-8000" => AsicVendor::Cisco8000,
            "mellanox" => AsicVendor::Mellanox,
            "broadcom" => AsicVendor::Broadcom,
            other => AsicVendor::Other(other.to_string()),
        }
    }

    /// The `asic_type` tag for this vendor.
    pub fn tag(&self) -> &str {
        match self {
            AsicVendor::Cisco8000 => "cisco-8000",
            AsicVendor::Mellanox => "mellanox",
            AsicVendor::Broadcom => "broadcom",
            AsicVendor::Other(tag) => tag,
        }
    }
}

impl fmt::Display for AsicVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
