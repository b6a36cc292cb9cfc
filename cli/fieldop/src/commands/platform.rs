//! `fieldop platform`: what the validator sees on this device.

use std::path::Path;

use anyhow::{Context, Result};
use fieldop_platform::{
    extract_branch_version, identify_asic, AsicVendor, DeviceInfo, PlatformProbe,
};
use fieldop_rules::RulesSource;

use crate::config::FieldopConfig;

/// Print the vendor tag, resolved platform and branch version.
pub fn run(config: &FieldopConfig, rules: Option<&Path>) -> Result<()> {
    let source = config.rules_source(rules)?;
    let out = describe(&source, &config.version_file(), &config.probe())?;
    print!("{out}");
    Ok(())
}

fn describe(
    rules: &dyn RulesSource,
    device: &dyn DeviceInfo,
    probe: &dyn PlatformProbe,
) -> Result<String> {
    let doc = rules.load().context("loading rules document")?;
    let info = device.version_info().context("reading device version")?;
    let vendor = AsicVendor::from_tag(&info.asic_type);
    let platform = identify_asic(&doc, &vendor, probe)?;
    let branch = extract_branch_version(&info.build_version);

    let mut out = String::new();
    out.push_str(&format!("Vendor:         {vendor}\n"));
    out.push_str(&format!("Platform:       {platform}\n"));
    out.push_str(&format!("Build version:  {}\n", info.build_version));
    match branch {
        Some(branch) => out.push_str(&format!("Branch version: {branch}\n")),
        None => out.push_str("Branch version: none (version gates not applied)\n"),
    }
    if platform.is_unknown() {
        out.push_str("note: every patch element touching governed tables will be rejected\n");
    }
    Ok(out)
}
